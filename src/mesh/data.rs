//! Cell-centered state container.
//!
//! Fields are registered by name before allocation and resolved to fixed
//! buffer slots ([`FieldId`]) so the stepping loop never performs a name
//! lookup. `create()` allocates every buffer at the padded grid shape
//! exactly once; afterwards the buffers are only mutated in place.

use hashbrown::HashMap;
use ndarray::{Array2, ArrayView2, s};

use crate::error::{Error, Result};
use crate::mesh::boundary::BcPolicy;
use crate::mesh::grid::Grid2d;

/// Fixed buffer slot handle issued by [`CellCenteredData::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(usize);

impl FieldId {
    pub fn index(self) -> usize {
        self.0
    }
}

pub struct CellCenteredData {
    grid: Grid2d,
    names: Vec<String>,
    bcs: Vec<BcPolicy>,
    lookup: HashMap<String, FieldId>,
    fields: Vec<Array2<f64>>,
    allocated: bool,
}

impl CellCenteredData {
    pub fn new(grid: Grid2d) -> CellCenteredData {
        CellCenteredData {
            grid,
            names: Vec::new(),
            bcs: Vec::new(),
            lookup: HashMap::new(),
            fields: Vec::new(),
            allocated: false,
        }
    }

    pub fn grid(&self) -> &Grid2d {
        &self.grid
    }

    /// Add a named field with its ghost-fill policy. Fails after
    /// allocation or on a duplicate name.
    pub fn register(&mut self, name: &str, bc: BcPolicy) -> Result<FieldId> {
        if self.allocated {
            return Err(Error::AlreadyAllocated);
        }
        if self.lookup.contains_key(name) {
            return Err(Error::DuplicateField(name.to_string()));
        }
        let id = FieldId(self.names.len());
        self.names.push(name.to_string());
        self.bcs.push(bc);
        self.lookup.insert(name.to_string(), id);
        Ok(id)
    }

    /// Allocate every registered field at the padded grid shape.
    /// Idempotent-once: a second call is a configuration error.
    pub fn create(&mut self) -> Result<()> {
        if self.allocated {
            return Err(Error::AlreadyAllocated);
        }
        if self.names.is_empty() {
            return Err(Error::NothingRegistered);
        }
        self.fields = (0..self.names.len())
            .map(|_| self.grid.scratch_array())
            .collect();
        self.allocated = true;
        Ok(())
    }

    pub fn nfields(&self) -> usize {
        self.names.len()
    }

    pub fn field_ids(&self) -> impl Iterator<Item = FieldId> + use<> {
        (0..self.names.len()).map(FieldId)
    }

    /// Resolve a field name to its slot. Setup path only.
    pub fn field_id(&self, name: &str) -> Result<FieldId> {
        self.lookup
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownField(name.to_string()))
    }

    pub fn name(&self, id: FieldId) -> &str {
        &self.names[id.0]
    }

    pub fn bc(&self, id: FieldId) -> BcPolicy {
        self.bcs[id.0]
    }

    pub fn field(&self, id: FieldId) -> &Array2<f64> {
        debug_assert!(self.allocated, "field access before create()");
        &self.fields[id.0]
    }

    pub fn field_mut(&mut self, id: FieldId) -> &mut Array2<f64> {
        debug_assert!(self.allocated, "field access before create()");
        &mut self.fields[id.0]
    }

    /// Ghost-free view of one field. Internal buffers always carry the
    /// padded grid shape, so no shape check is needed here.
    pub fn interior(&self, id: FieldId) -> ArrayView2<'_, f64> {
        let g = &self.grid;
        self.field(id).slice(s![g.ilo..=g.ihi, g.jlo..=g.jhi])
    }

    /// A zeroed padded buffer for transient derivative storage; never
    /// aliases a registered field.
    pub fn scratch_array(&self) -> Array2<f64> {
        self.grid.scratch_array()
    }

    /// Apply each field's boundary policy to its ghost region.
    pub fn fill_boundary_conditions(&mut self) {
        for (buf, bc) in self.fields.iter_mut().zip(&self.bcs) {
            bc.apply(buf, &self.grid);
        }
    }

    /// Copy of every field buffer, in slot order. Used by the integrator
    /// to make failed steps unobservable.
    pub fn snapshot(&self) -> Vec<Array2<f64>> {
        self.fields.clone()
    }

    /// Overwrite every field from a snapshot taken on this container.
    pub fn restore(&mut self, snapshot: &[Array2<f64>]) {
        debug_assert_eq!(snapshot.len(), self.fields.len());
        for (buf, saved) in self.fields.iter_mut().zip(snapshot) {
            buf.assign(saved);
        }
    }
}
