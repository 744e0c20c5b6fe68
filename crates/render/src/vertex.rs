use bytemuck::{Pod, Zeroable};

/// One corner of a tile quad, laid out for direct upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    /// Sort key applied on top of `position.z`; not a camera-space depth.
    pub depth_offset: f32,
    pub tex_coord: [f32; 2],
    pub color: [f32; 4],
}

/// Growable vertex storage whose logical length is tracked apart from its
/// backing allocation.
///
/// `clear` only resets the length, so a buffer that has been sized for the
/// largest frame so far never allocates again.
#[derive(Debug, Clone, Default)]
pub struct VertexBuffer {
    storage: Vec<Vertex>,
    len: usize,
}

impl VertexBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grow the backing storage to hold at least `vertices`. Never shrinks.
    pub fn ensure_capacity(&mut self, vertices: usize) {
        if self.storage.len() < vertices {
            self.storage.resize(vertices, Vertex::zeroed());
        }
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Append the four corners of one quad.
    pub fn push_quad(&mut self, quad: [Vertex; 4]) {
        let end = self.len + quad.len();
        self.ensure_capacity(end);
        self.storage[self.len..end].copy_from_slice(&quad);
        self.len = end;
    }

    pub fn as_slice(&self) -> &[Vertex] {
        &self.storage[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Vertices the buffer can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(tag: f32) -> [Vertex; 4] {
        [Vertex {
            depth_offset: tag,
            ..Vertex::default()
        }; 4]
    }

    #[test]
    fn vertex_layout_is_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 40);
    }

    #[test]
    fn push_grows_and_tracks_length() {
        let mut buffer = VertexBuffer::new();
        assert!(buffer.is_empty());
        buffer.push_quad(quad(1.0));
        buffer.push_quad(quad(2.0));
        assert_eq!(buffer.len(), 8);
        assert_eq!(buffer.as_slice()[4].depth_offset, 2.0);
        let bytes: &[u8] = bytemuck::cast_slice(buffer.as_slice());
        assert_eq!(bytes.len(), 8 * 40);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut buffer = VertexBuffer::new();
        buffer.ensure_capacity(64);
        for i in 0..16 {
            buffer.push_quad(quad(i as f32));
        }
        assert_eq!(buffer.capacity(), 64);

        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 64);

        buffer.push_quad(quad(9.0));
        assert_eq!(buffer.as_slice().len(), 4);
        assert_eq!(buffer.as_slice()[0].depth_offset, 9.0);
    }

    #[test]
    fn ensure_capacity_never_shrinks() {
        let mut buffer = VertexBuffer::new();
        buffer.ensure_capacity(32);
        buffer.ensure_capacity(8);
        assert_eq!(buffer.capacity(), 32);
    }
}
