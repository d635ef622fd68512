//! LP variables.

use serde::Serialize;
use tracing::debug;

use shop_core::{
    get_attribute_value, set_attribute, AttributeRef, AttributeTypeTag, AttributeValue, ShopApi,
    ShopError, ShopResult,
};

use crate::model::{slice_range, LpModel, LP_OBJECT_NAME, LP_OBJECT_TYPE};
use crate::var_type::VarType;

/// Upper bound given to new variables when none is specified.
pub const DEFAULT_UB: f64 = 1e20;
/// Lower bound given to new variables when none is specified.
pub const DEFAULT_LB: f64 = -1e20;

/// One LP variable: a borrowed model plus the variable's id.
#[derive(Debug, Clone, Copy)]
pub struct Var<'a> {
    model: &'a LpModel,
    id: usize,
}

/// Owned summary of a variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarInfo {
    pub id: usize,
    pub type_id: usize,
    pub type_name: String,
    pub index_type_ids: Vec<i64>,
    pub index_type_names: Vec<String>,
    pub index_values: Vec<i64>,
    pub index_descriptions: Vec<String>,
    pub ub: f64,
    pub lb: f64,
    pub cc: f64,
    pub bin: bool,
}

/// Optional overrides when adding a variable. `None` keeps the current value
/// of a matching variable, or the default for a new one.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VarParameters {
    pub ub: Option<f64>,
    pub lb: Option<f64>,
    pub cc: Option<f64>,
    pub bin: Option<bool>,
}

impl<'a> Var<'a> {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn type_id(&self) -> usize {
        self.model.arrays().var_type[self.id] as usize
    }

    pub fn var_type(&self) -> VarType<'a> {
        VarType::new(self.model, self.type_id())
    }

    pub fn type_name(&self) -> &'a str {
        self.var_type().name()
    }

    pub fn type_abbrev(&self) -> &'a str {
        self.var_type().abbrev()
    }

    pub fn index_type_ids(&self) -> &'a [i64] {
        self.var_type().index_types()
    }

    pub fn index_type_names(&self) -> Vec<&'a str> {
        self.var_type().index_type_names()
    }

    /// Index values, one per index type.
    pub fn index_values(&self) -> &'a [i64] {
        let arrays = self.model.arrays();
        let range = slice_range(arrays.var_index_beg[self.id], arrays.var_index_cnt[self.id]);
        &arrays.var_index_val[range]
    }

    /// Describe each index value under its index type.
    pub fn index_descriptions(&self) -> ShopResult<Vec<&'a str>> {
        let index_types = self.model.index_type();
        self.index_type_ids()
            .iter()
            .zip(self.index_values())
            .map(|(&t, &v)| index_types.get(t as usize)?.description(v))
            .collect()
    }

    pub fn ub(&self) -> f64 {
        self.model.arrays().ub[self.id]
    }

    pub fn lb(&self) -> f64 {
        self.model.arrays().lb[self.id]
    }

    /// Cost coefficient.
    pub fn cc(&self) -> f64 {
        self.model.arrays().cc[self.id]
    }

    pub fn bin(&self) -> bool {
        self.model.arrays().bin[self.id] != 0
    }

    pub fn info(&self) -> ShopResult<VarInfo> {
        Ok(VarInfo {
            id: self.id,
            type_id: self.type_id(),
            type_name: self.type_name().to_string(),
            index_type_ids: self.index_type_ids().to_vec(),
            index_type_names: self.index_type_names().into_iter().map(String::from).collect(),
            index_values: self.index_values().to_vec(),
            index_descriptions: self
                .index_descriptions()?
                .into_iter()
                .map(String::from)
                .collect(),
            ub: self.ub(),
            lb: self.lb(),
            cc: self.cc(),
            bin: self.bin(),
        })
    }

    /// `lb <= abbrev[index values] <= ub`.
    pub fn format(&self) -> String {
        format!(
            "{} <= {}{:?} <= {}",
            self.lb(),
            self.type_abbrev(),
            self.index_values(),
            self.ub()
        )
    }

    /// Re-add this variable with some parameters overridden.
    ///
    /// Returns the engine's id of the added variable. The borrowed model is
    /// not updated; reload it to see the change.
    pub fn set_parameters<A>(&self, api: &mut A, params: VarParameters) -> ShopResult<i64>
    where
        A: ShopApi + ?Sized,
    {
        write_add_var(
            api,
            self.type_id() as i64,
            self.index_values(),
            VarParameters {
                ub: Some(params.ub.unwrap_or(self.ub())),
                lb: Some(params.lb.unwrap_or(self.lb())),
                cc: Some(params.cc.unwrap_or(self.cc())),
                bin: Some(params.bin.unwrap_or(self.bin())),
            },
        )
    }
}

/// Entry point for the variables of a model.
#[derive(Debug, Clone, Copy)]
pub struct VarBuilder<'a> {
    model: &'a LpModel,
}

impl<'a> VarBuilder<'a> {
    pub(crate) fn new(model: &'a LpModel) -> Self {
        Self { model }
    }

    pub fn n_vars(&self) -> usize {
        self.model.arrays().var_type.len()
    }

    pub fn get(&self, id: usize) -> ShopResult<Var<'a>> {
        let len = self.n_vars();
        if id >= len {
            return Err(ShopError::Index {
                what: "variables",
                index: id as i64,
                len,
            });
        }
        Ok(Var {
            model: self.model,
            id,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Var<'a>> + 'a {
        let model = self.model;
        (0..self.n_vars()).map(move |id| Var { model, id })
    }

    /// Ids of variables of `var_type` whose index values match `index_values`.
    ///
    /// A negative pattern entry matches any value. An empty pattern matches
    /// every variable of the type; `None` matches every type.
    pub fn filter(&self, var_type: Option<usize>, index_values: &[i64]) -> Vec<usize> {
        self.iter()
            .filter(|var| var_type.map_or(true, |t| var.type_id() == t))
            .filter(|var| {
                var.index_values()
                    .iter()
                    .zip(index_values)
                    .all(|(&value, &pattern)| pattern < 0 || value == pattern)
            })
            .map(|var| var.id())
            .collect()
    }

    /// Add a variable through the engine's `add_var_*` attributes.
    ///
    /// When a variable with the same type and index already exists, its
    /// parameters fill in the unspecified ones; otherwise the defaults are
    /// `ub = 1e20`, `lb = -1e20`, `cc = 0` and a continuous variable.
    pub fn add<A>(
        &self,
        api: &mut A,
        var_type: usize,
        index_values: &[i64],
        params: VarParameters,
    ) -> ShopResult<i64>
    where
        A: ShopApi + ?Sized,
    {
        let existing = self
            .filter(Some(var_type), index_values)
            .first()
            .map(|&id| self.get(id))
            .transpose()?;

        let resolved = match existing {
            Some(var) => {
                debug!("Variable {} already exists, keeping its parameters", var.format());
                VarParameters {
                    ub: Some(params.ub.unwrap_or(var.ub())),
                    lb: Some(params.lb.unwrap_or(var.lb())),
                    cc: Some(params.cc.unwrap_or(var.cc())),
                    bin: Some(params.bin.unwrap_or(var.bin())),
                }
            }
            None => VarParameters {
                ub: Some(params.ub.unwrap_or(DEFAULT_UB)),
                lb: Some(params.lb.unwrap_or(DEFAULT_LB)),
                cc: Some(params.cc.unwrap_or(0.0)),
                bin: Some(params.bin.unwrap_or(false)),
            },
        };
        write_add_var(api, var_type as i64, index_values, resolved)
    }
}

fn write_add_var<A>(
    api: &mut A,
    var_type: i64,
    index_values: &[i64],
    params: VarParameters,
) -> ShopResult<i64>
where
    A: ShopApi + ?Sized,
{
    let attr = |name: &'static str| AttributeRef::new(LP_OBJECT_TYPE, LP_OBJECT_NAME, name);
    let writes = [
        ("add_var_type", AttributeTypeTag::Int, AttributeValue::Int(var_type)),
        (
            "add_var_index",
            AttributeTypeTag::IntArray,
            AttributeValue::IntArray(index_values.to_vec()),
        ),
        (
            "add_var_ub",
            AttributeTypeTag::Double,
            AttributeValue::Double(params.ub.unwrap_or(DEFAULT_UB)),
        ),
        (
            "add_var_lb",
            AttributeTypeTag::Double,
            AttributeValue::Double(params.lb.unwrap_or(DEFAULT_LB)),
        ),
        (
            "add_var_cc",
            AttributeTypeTag::Double,
            AttributeValue::Double(params.cc.unwrap_or(0.0)),
        ),
        (
            "add_var_bin",
            AttributeTypeTag::Int,
            AttributeValue::Int(i64::from(params.bin.unwrap_or(false))),
        ),
    ];
    for (name, tag, value) in &writes {
        set_attribute(api, &attr(*name), *tag, value)?;
    }

    let last = attr("add_var_last");
    get_attribute_value(&*api, &last, AttributeTypeTag::Int)?
        .as_int()
        .ok_or_else(|| ShopError::Engine(format!("{last} is not an int")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;

    fn model() -> LpModel {
        LpModel::new(fixtures::arrays()).unwrap()
    }

    #[test]
    fn test_var_accessors() {
        let model = model();
        let var = model.var().get(1).unwrap();
        assert_eq!(var.id(), 1);
        assert_eq!(var.type_id(), 0);
        assert_eq!(var.type_name(), "plant production");
        assert_eq!(var.type_abbrev(), "P");
        assert_eq!(var.index_type_ids(), [0, 2]);
        assert_eq!(var.index_type_names(), ["plant", "time"]);
        assert_eq!(var.index_values(), [0, 1]);
        assert_eq!(var.index_descriptions().unwrap(), ["Plant1", "t1"]);
        assert!(!var.bin());
    }

    #[test]
    fn test_format() {
        let model = model();
        assert_eq!(model.var().get(2).unwrap().format(), "5 <= V[1, 1] <= 50");
    }

    #[test]
    fn test_info() {
        let model = model();
        let info = model.var().get(2).unwrap().info().unwrap();
        assert_eq!(info.type_name, "reservoir volume");
        assert_eq!(info.index_type_names, ["reservoir", "time"]);
        assert_eq!(info.index_descriptions, ["Rsv2", "t1"]);
        assert!(info.bin);

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["type_id"], 1);
        assert_eq!(json["index_values"], serde_json::json!([1, 1]));
    }

    #[test]
    fn test_get_out_of_range() {
        let model = model();
        assert!(matches!(
            model.var().get(3),
            Err(ShopError::Index { index: 3, len: 3, .. })
        ));
    }

    #[test]
    fn test_filter() {
        let model = model();
        let vars = model.var();
        assert_eq!(vars.n_vars(), 3);
        assert_eq!(vars.filter(None, &[]), [0, 1, 2]);
        assert_eq!(vars.filter(Some(0), &[]), [0, 1]);
        assert_eq!(vars.filter(Some(0), &[0, 1]), [1]);
        assert_eq!(vars.filter(Some(0), &[-1, 0]), [0]);
        assert_eq!(vars.filter(None, &[-1, 1]), [1, 2]);
        assert!(vars.filter(Some(1), &[0]).is_empty());
    }
}
