//! LP index types (plant, reservoir, time step, ...).

use shop_core::{ShopError, ShopResult};

use crate::model::{slice_range, LpModel};

#[derive(Debug, Clone, Copy)]
pub struct IndexType<'a> {
    model: &'a LpModel,
    id: usize,
}

impl<'a> IndexType<'a> {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &'a str {
        &self.model.arrays().index_type_names[self.id]
    }

    /// One description per index value.
    pub fn descriptions(&self) -> &'a [String] {
        let arrays = self.model.arrays();
        let range = slice_range(
            arrays.index_type_desc_beg[self.id],
            arrays.index_type_desc_cnt[self.id],
        );
        &arrays.index_type_desc_val[range]
    }

    /// Description of index value `value`.
    pub fn description(&self, value: i64) -> ShopResult<&'a str> {
        let descriptions = self.descriptions();
        usize::try_from(value)
            .ok()
            .and_then(|i| descriptions.get(i))
            .map(String::as_str)
            .ok_or(ShopError::Index {
                what: "index descriptions",
                index: value,
                len: descriptions.len(),
            })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IndexTypeBuilder<'a> {
    model: &'a LpModel,
}

impl<'a> IndexTypeBuilder<'a> {
    pub(crate) fn new(model: &'a LpModel) -> Self {
        Self { model }
    }

    pub fn len(&self) -> usize {
        self.model.arrays().index_type_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn names(&self) -> &'a [String] {
        &self.model.arrays().index_type_names
    }

    pub fn get(&self, id: usize) -> ShopResult<IndexType<'a>> {
        let len = self.len();
        if id >= len {
            return Err(ShopError::Index {
                what: "index types",
                index: id as i64,
                len,
            });
        }
        Ok(IndexType {
            model: self.model,
            id,
        })
    }

    pub fn by_name(&self, name: &str) -> Option<IndexType<'a>> {
        self.names()
            .iter()
            .position(|n| n == name)
            .map(|id| IndexType {
                model: self.model,
                id,
            })
    }
}
