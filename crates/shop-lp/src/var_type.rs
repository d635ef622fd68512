//! LP variable types.

use shop_core::{ShopError, ShopResult};

use crate::model::{slice_range, LpModel};

/// A variable type such as "plant production", with its index types.
#[derive(Debug, Clone, Copy)]
pub struct VarType<'a> {
    model: &'a LpModel,
    id: usize,
}

impl<'a> VarType<'a> {
    pub(crate) fn new(model: &'a LpModel, id: usize) -> Self {
        Self { model, id }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &'a str {
        &self.model.arrays().var_type_names[self.id]
    }

    pub fn abbrev(&self) -> &'a str {
        &self.model.arrays().var_type_abbrev[self.id]
    }

    /// Ids of the index types, in index order.
    pub fn index_types(&self) -> &'a [i64] {
        let arrays = self.model.arrays();
        let range = slice_range(
            arrays.var_type_index_type_beg[self.id],
            arrays.var_type_index_type_cnt[self.id],
        );
        &arrays.var_type_index_type_val[range]
    }

    pub fn index_type_names(&self) -> Vec<&'a str> {
        let names = &self.model.arrays().index_type_names;
        self.index_types()
            .iter()
            .map(|&id| names[id as usize].as_str())
            .collect()
    }

    /// Ids of every variable of this type.
    pub fn vars(&self) -> Vec<usize> {
        self.model.var().filter(Some(self.id), &[])
    }
}

#[derive(Debug, Clone, Copy)]
pub struct VarTypeBuilder<'a> {
    model: &'a LpModel,
}

impl<'a> VarTypeBuilder<'a> {
    pub(crate) fn new(model: &'a LpModel) -> Self {
        Self { model }
    }

    pub fn len(&self) -> usize {
        self.model.arrays().var_type_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn names(&self) -> &'a [String] {
        &self.model.arrays().var_type_names
    }

    pub fn get(&self, id: usize) -> ShopResult<VarType<'a>> {
        let len = self.len();
        if id >= len {
            return Err(ShopError::Index {
                what: "variable types",
                index: id as i64,
                len,
            });
        }
        Ok(VarType::new(self.model, id))
    }

    /// Look a type up by name. `plant_production` also finds "plant production".
    pub fn by_name(&self, name: &str) -> Option<VarType<'a>> {
        self.names()
            .iter()
            .position(|n| n == name || n.replace(' ', "_") == name)
            .map(|id| VarType::new(self.model, id))
    }

    pub fn iter(&self) -> impl Iterator<Item = VarType<'a>> + 'a {
        let model = self.model;
        (0..self.len()).map(move |id| VarType::new(model, id))
    }
}
