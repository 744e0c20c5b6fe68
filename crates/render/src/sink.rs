use std::fmt::Write;

use tilemap_common::MaterialHandle;

use crate::vertex::Vertex;

/// Destination for generated tile batches: the graphics device, or anything
/// standing in for it.
pub trait QuadSink {
    /// Draw `quad_count` quads from `vertices` (four vertices per quad) with
    /// `material`. Called exactly once per tilemap render.
    fn submit_quads(&mut self, material: MaterialHandle, vertices: &[Vertex], quad_count: usize);

    /// Profiling hook, called before each submission.
    fn record_counts(&mut self, _tiles: usize, _vertices: usize) {}
}

/// Keeps a copy of the most recent batch plus running counters.
#[derive(Debug, Clone, Default)]
pub struct CaptureSink {
    pub material: Option<MaterialHandle>,
    pub vertices: Vec<Vertex>,
    pub quad_count: usize,
    pub submissions: usize,
    pub total_tiles: usize,
    pub total_vertices: usize,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QuadSink for CaptureSink {
    fn submit_quads(&mut self, material: MaterialHandle, vertices: &[Vertex], quad_count: usize) {
        self.material = Some(material);
        self.vertices.clear();
        self.vertices.extend_from_slice(vertices);
        self.quad_count = quad_count;
        self.submissions += 1;
    }

    fn record_counts(&mut self, tiles: usize, vertices: usize) {
        self.total_tiles += tiles;
        self.total_vertices += vertices;
    }
}

/// Debug text sink, standing in for a GPU device.
///
/// Appends a human-readable line per submission, optionally followed by a
/// dump of every vertex. Useful for CLI output and logging.
#[derive(Debug, Default)]
pub struct DebugTextSink {
    pub dump_vertices: bool,
    output: String,
}

impl DebugTextSink {
    pub fn new(dump_vertices: bool) -> Self {
        Self {
            dump_vertices,
            output: String::new(),
        }
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

impl QuadSink for DebugTextSink {
    fn submit_quads(&mut self, material: MaterialHandle, vertices: &[Vertex], quad_count: usize) {
        // Writing into a String cannot fail.
        let _ = writeln!(
            self.output,
            "=== Batch (material={}, quads={}, vertices={}) ===",
            material.0,
            quad_count,
            vertices.len()
        );
        if !self.dump_vertices {
            return;
        }
        for (i, quad) in vertices.chunks_exact(4).take(quad_count).enumerate() {
            let p = quad[0].position;
            let _ = writeln!(
                self.output,
                "  [{i:>5}] pos=({:.2}, {:.2}, {:.2}) depth=({:.3}, {:.3}) uv=({:.3}, {:.3})",
                p[0],
                p[1],
                p[2],
                quad[0].depth_offset,
                quad[1].depth_offset,
                quad[0].tex_coord[0],
                quad[0].tex_coord[1]
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> [Vertex; 4] {
        [Vertex {
            position: [1.0, 2.0, 3.0],
            ..Vertex::default()
        }; 4]
    }

    #[test]
    fn capture_sink_keeps_last_batch() {
        let mut sink = CaptureSink::new();
        let batch: Vec<Vertex> = quad().into_iter().chain(quad()).collect();
        sink.record_counts(2, 8);
        sink.submit_quads(MaterialHandle(4), &batch, 2);
        sink.record_counts(1, 4);
        sink.submit_quads(MaterialHandle(4), &batch[..4], 1);

        assert_eq!(sink.material, Some(MaterialHandle(4)));
        assert_eq!(sink.vertices.len(), 4);
        assert_eq!(sink.quad_count, 1);
        assert_eq!(sink.submissions, 2);
        assert_eq!(sink.total_tiles, 3);
        assert_eq!(sink.total_vertices, 12);
    }

    #[test]
    fn debug_text_sink_summary() {
        let mut sink = DebugTextSink::new(false);
        sink.submit_quads(MaterialHandle(9), &quad(), 1);
        assert!(sink.output().contains("material=9"));
        assert!(sink.output().contains("quads=1"));
        assert!(!sink.output().contains("pos="));
    }

    #[test]
    fn debug_text_sink_dumps_vertices() {
        let mut sink = DebugTextSink::new(true);
        sink.submit_quads(MaterialHandle(0), &quad(), 1);
        let text = sink.take_output();
        assert!(text.contains("pos=(1.00, 2.00, 3.00)"));
        assert!(sink.output().is_empty());
    }
}
