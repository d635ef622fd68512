//! LP-model arrays exported by the engine.
//!
//! The engine publishes its LP model as flat arrays on the `lp_model` object.
//! Variable-length lists (a variable's index values, a variable type's index
//! types, an index type's value descriptions) are stored CSR-style: a
//! `*_beg`/`*_cnt` pair per owner pointing into a shared `*_val` array.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::debug;

use shop_core::{
    get_attribute_value, AttributeRef, AttributeTypeTag, ShopApi, ShopError, ShopResult,
};

use crate::index_type::IndexTypeBuilder;
use crate::var::VarBuilder;
use crate::var_type::VarTypeBuilder;

/// Object type and name of the engine's LP model.
pub const LP_OBJECT_TYPE: &str = "lp_model";
pub const LP_OBJECT_NAME: &str = "lp_model";

/// Raw LP-model arrays, as handed over by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LpArrays {
    // === Per variable ===
    pub var_type: Vec<i64>,
    pub var_index_beg: Vec<i64>,
    pub var_index_cnt: Vec<i64>,
    pub ub: Vec<f64>,
    pub lb: Vec<f64>,
    pub cc: Vec<f64>,
    pub bin: Vec<i64>,
    pub var_index_val: Vec<i64>,

    // === Per variable type ===
    pub var_type_names: Vec<String>,
    pub var_type_abbrev: Vec<String>,
    pub var_type_index_type_beg: Vec<i64>,
    pub var_type_index_type_cnt: Vec<i64>,
    pub var_type_index_type_val: Vec<i64>,

    // === Per index type ===
    pub index_type_names: Vec<String>,
    pub index_type_desc_beg: Vec<i64>,
    pub index_type_desc_cnt: Vec<i64>,
    pub index_type_desc_val: Vec<String>,
}

/// Validated LP model. Facades borrow it and hold only an index.
#[derive(Debug, Clone, PartialEq)]
pub struct LpModel {
    arrays: LpArrays,
}

impl LpModel {
    /// Validate `arrays` and wrap them.
    ///
    /// Checks that per-owner arrays agree in length, that every
    /// `beg`/`cnt` window lies inside its value array and that every type
    /// id points at an existing variable or index type. After this, facade
    /// accessors cannot index out of bounds.
    pub fn new(arrays: LpArrays) -> ShopResult<Self> {
        let n_vars = arrays.var_type.len();
        same_len("var_type", n_vars, "var_index_beg", arrays.var_index_beg.len())?;
        same_len("var_type", n_vars, "var_index_cnt", arrays.var_index_cnt.len())?;
        same_len("var_type", n_vars, "ub", arrays.ub.len())?;
        same_len("var_type", n_vars, "lb", arrays.lb.len())?;
        same_len("var_type", n_vars, "cc", arrays.cc.len())?;
        same_len("var_type", n_vars, "bin", arrays.bin.len())?;

        let n_types = arrays.var_type_names.len();
        same_len("var_type_names", n_types, "var_type_abbrev", arrays.var_type_abbrev.len())?;
        same_len(
            "var_type_names",
            n_types,
            "var_type_index_type_beg",
            arrays.var_type_index_type_beg.len(),
        )?;
        same_len(
            "var_type_names",
            n_types,
            "var_type_index_type_cnt",
            arrays.var_type_index_type_cnt.len(),
        )?;

        let n_index_types = arrays.index_type_names.len();
        same_len(
            "index_type_names",
            n_index_types,
            "index_type_desc_beg",
            arrays.index_type_desc_beg.len(),
        )?;
        same_len(
            "index_type_names",
            n_index_types,
            "index_type_desc_cnt",
            arrays.index_type_desc_cnt.len(),
        )?;

        for id in 0..n_vars {
            window(arrays.var_index_beg[id], arrays.var_index_cnt[id], arrays.var_index_val.len())?;
            check_id("var_type", arrays.var_type[id], n_types)?;
        }
        for id in 0..n_types {
            let range = window(
                arrays.var_type_index_type_beg[id],
                arrays.var_type_index_type_cnt[id],
                arrays.var_type_index_type_val.len(),
            )?;
            for &index_type in &arrays.var_type_index_type_val[range] {
                check_id("var_type_index_type_val", index_type, n_index_types)?;
            }
        }
        for id in 0..n_index_types {
            window(
                arrays.index_type_desc_beg[id],
                arrays.index_type_desc_cnt[id],
                arrays.index_type_desc_val.len(),
            )?;
        }

        Ok(Self { arrays })
    }

    /// Fetch the LP model from the engine.
    pub fn load<A>(api: &A) -> ShopResult<Self>
    where
        A: ShopApi + ?Sized,
    {
        let ints = |name: &str| -> ShopResult<Vec<i64>> {
            let attr = AttributeRef::new(LP_OBJECT_TYPE, LP_OBJECT_NAME, name);
            get_attribute_value(api, &attr, AttributeTypeTag::IntArray)?
                .into_int_array()
                .ok_or_else(|| ShopError::Engine(format!("{attr} is not an int array")))
        };
        let doubles = |name: &str| -> ShopResult<Vec<f64>> {
            let attr = AttributeRef::new(LP_OBJECT_TYPE, LP_OBJECT_NAME, name);
            get_attribute_value(api, &attr, AttributeTypeTag::DoubleArray)?
                .into_double_array()
                .ok_or_else(|| ShopError::Engine(format!("{attr} is not a double array")))
        };
        let strings = |name: &str| -> ShopResult<Vec<String>> {
            let attr = AttributeRef::new(LP_OBJECT_TYPE, LP_OBJECT_NAME, name);
            get_attribute_value(api, &attr, AttributeTypeTag::StringArray)?
                .into_string_array()
                .ok_or_else(|| ShopError::Engine(format!("{attr} is not a string array")))
        };

        let arrays = LpArrays {
            var_type: ints("var_type")?,
            var_index_beg: ints("var_index_beg")?,
            var_index_cnt: ints("var_index_cnt")?,
            ub: doubles("ub")?,
            lb: doubles("lb")?,
            cc: doubles("cc")?,
            bin: ints("bin")?,
            var_index_val: ints("var_index_val")?,
            var_type_names: strings("var_type_names")?,
            var_type_abbrev: strings("var_type_abbrev")?,
            var_type_index_type_beg: ints("var_type_index_type_beg")?,
            var_type_index_type_cnt: ints("var_type_index_type_cnt")?,
            var_type_index_type_val: ints("var_type_index_type_val")?,
            index_type_names: strings("index_type_names")?,
            index_type_desc_beg: ints("index_type_desc_beg")?,
            index_type_desc_cnt: ints("index_type_desc_cnt")?,
            index_type_desc_val: strings("index_type_desc_val")?,
        };
        debug!(
            "Loaded LP model: {} variables, {} variable types, {} index types",
            arrays.var_type.len(),
            arrays.var_type_names.len(),
            arrays.index_type_names.len()
        );
        Self::new(arrays)
    }

    pub fn arrays(&self) -> &LpArrays {
        &self.arrays
    }

    /// Variables of the model.
    pub fn var(&self) -> VarBuilder<'_> {
        VarBuilder::new(self)
    }

    /// Variable types of the model.
    pub fn var_type(&self) -> VarTypeBuilder<'_> {
        VarTypeBuilder::new(self)
    }

    /// Index types of the model.
    pub fn index_type(&self) -> IndexTypeBuilder<'_> {
        IndexTypeBuilder::new(self)
    }
}

fn same_len(left: &str, left_len: usize, right: &str, right_len: usize) -> ShopResult<()> {
    if left_len == right_len {
        Ok(())
    } else {
        Err(ShopError::lengths(left, left_len, right, right_len))
    }
}

fn check_id(what: &str, id: i64, len: usize) -> ShopResult<()> {
    match usize::try_from(id) {
        Ok(id) if id < len => Ok(()),
        _ => Err(ShopError::ShapeMismatch(format!(
            "{what} refers to id {id}, only {len} exist"
        ))),
    }
}

fn window(beg: i64, cnt: i64, len: usize) -> ShopResult<Range<usize>> {
    let out_of_bounds =
        || ShopError::ShapeMismatch(format!("window {beg}+{cnt} exceeds {len} values"));
    let beg = usize::try_from(beg).map_err(|_| out_of_bounds())?;
    let cnt = usize::try_from(cnt).map_err(|_| out_of_bounds())?;
    let end = beg.checked_add(cnt).ok_or_else(out_of_bounds)?;
    if end > len {
        return Err(out_of_bounds());
    }
    Ok(beg..end)
}

/// `beg`/`cnt` window into a validated model; only called after [`LpModel::new`].
pub(crate) fn slice_range(beg: i64, cnt: i64) -> Range<usize> {
    let beg = beg as usize;
    beg..beg + cnt as usize
}
