//! Geometry resources and live-resource accounting
//!
//! A [`Geometry`] owns CPU-side shape data and, once uploaded, the vertex,
//! triangle index and wireframe index buffers on the GPU. Every geometry holds
//! an entry in the scene's [`ResourceLedger`] until it is disposed or dropped,
//! which makes leaked geometry observable without a GPU.

use std::{cell::Cell, rc::Rc};

use wgpu::util::DeviceExt;

use crate::gfx::geometry::{wireframe_indices, GeometryData};

/// Counts geometry resources that are currently alive
#[derive(Debug, Clone, Default)]
pub struct ResourceLedger {
    counters: Rc<LedgerCounters>,
}

#[derive(Debug, Default)]
struct LedgerCounters {
    live: Cell<usize>,
    allocated: Cell<usize>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of geometries allocated and not yet released
    pub fn live(&self) -> usize {
        self.counters.live.get()
    }

    /// Number of geometries ever allocated through this ledger
    pub fn allocated(&self) -> usize {
        self.counters.allocated.get()
    }

    fn acquire(&self) -> LedgerEntry {
        self.counters.live.set(self.counters.live.get() + 1);
        self.counters.allocated.set(self.counters.allocated.get() + 1);
        LedgerEntry {
            counters: self.counters.clone(),
        }
    }
}

/// Releases its ledger slot exactly once, when dropped
#[derive(Debug)]
struct LedgerEntry {
    counters: Rc<LedgerCounters>,
}

impl Drop for LedgerEntry {
    fn drop(&mut self) {
        self.counters.live.set(self.counters.live.get() - 1);
    }
}

/// GPU buffers backing an uploaded geometry
pub struct GeometryBuffers {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub wireframe_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub wireframe_count: u32,
}

impl GeometryBuffers {
    fn destroy(self) {
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
        self.wireframe_buffer.destroy();
    }
}

/// Shape data plus its (lazily created) GPU buffers
pub struct Geometry {
    data: GeometryData,
    gpu: Option<GeometryBuffers>,
    entry: Option<LedgerEntry>,
}

impl Geometry {
    /// Creates a geometry accounted for in `ledger`
    pub fn new(data: GeometryData, ledger: &ResourceLedger) -> Self {
        Self {
            data,
            gpu: None,
            entry: Some(ledger.acquire()),
        }
    }

    pub fn data(&self) -> &GeometryData {
        &self.data
    }

    pub fn is_disposed(&self) -> bool {
        self.entry.is_none()
    }

    pub fn buffers(&self) -> Option<&GeometryBuffers> {
        self.gpu.as_ref()
    }

    /// Releases GPU buffers and the ledger slot. Idempotent.
    pub fn dispose(&mut self) {
        if let Some(buffers) = self.gpu.take() {
            buffers.destroy();
        }
        self.entry = None;
    }

    /// Uploads vertex and index data if not already resident
    pub fn upload(&mut self, device: &wgpu::Device) {
        if self.gpu.is_some() || self.is_disposed() {
            return;
        }

        let vertices = self.data.to_vertices();
        let wireframe = wireframe_indices(&self.data.indices);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(&self.data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let wireframe_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Wireframe Index Buffer"),
            contents: bytemuck::cast_slice(&wireframe),
            usage: wgpu::BufferUsages::INDEX,
        });

        self.gpu = Some(GeometryBuffers {
            vertex_buffer,
            index_buffer,
            wireframe_buffer,
            index_count: self.data.indices.len() as u32,
            wireframe_count: wireframe.len() as u32,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_box;

    #[test]
    fn test_ledger_tracks_lifetime() {
        let ledger = ResourceLedger::new();
        let mut a = Geometry::new(generate_box(1.0, 1.0, 1.0, 1, 1, 1), &ledger);
        let b = Geometry::new(generate_box(1.0, 1.0, 1.0, 1, 1, 1), &ledger);
        assert_eq!(ledger.live(), 2);

        a.dispose();
        assert!(a.is_disposed());
        assert_eq!(ledger.live(), 1);

        // Disposing twice and then dropping must not release again
        a.dispose();
        drop(a);
        assert_eq!(ledger.live(), 1);

        drop(b);
        assert_eq!(ledger.live(), 0);
        assert_eq!(ledger.allocated(), 2);
    }
}
