//! Expression definitions in Cubism exp3 form, and the per-character catalog.
//!
//! An exp3 document looks like:
//! ```json
//! { "Type": "Live2D Expression",
//!   "Parameters": [ { "Id": "ParamCheek", "Value": 1.0, "Blend": "Add" } ] }
//! ```
//! `Blend` is optional and defaults to `Add`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::CatalogError;

pub const EXPRESSION_TYPE: &str = "Live2D Expression";
const EXP3_SUFFIX: &str = ".exp3.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlendMode {
    /// Delta over the current (motion-driven) value.
    #[default]
    Add,
    /// Scale the current value.
    Multiply,
    /// Interpolate toward an absolute target.
    Overwrite,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionParameter {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Value")]
    pub value: f32,
    #[serde(rename = "Blend", default)]
    pub blend: BlendMode,
}

impl ExpressionParameter {
    /// Add 0 and Multiply 1 leave the parameter untouched at any weight.
    pub fn is_noop(&self) -> bool {
        match self.blend {
            BlendMode::Add => self.value == 0.0,
            BlendMode::Multiply => self.value == 1.0,
            BlendMode::Overwrite => false,
        }
    }
}

/// An ordered, immutable set of parameter deltas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    #[serde(rename = "Type", default = "default_type")]
    pub kind: String,
    #[serde(rename = "Parameters", default)]
    pub parameters: Vec<ExpressionParameter>,
}

fn default_type() -> String {
    EXPRESSION_TYPE.to_string()
}

impl Expression {
    pub fn new(parameters: Vec<ExpressionParameter>) -> Self {
        Self {
            kind: default_type(),
            parameters,
        }
    }

    /// Build an Add-only expression, dropping zero deltas.
    pub fn additive(params: &[(&str, f32)]) -> Self {
        Self::new(
            params
                .iter()
                .filter(|(_, value)| *value != 0.0)
                .map(|(id, value)| ExpressionParameter {
                    id: (*id).to_string(),
                    value: *value,
                    blend: BlendMode::Add,
                })
                .collect(),
        )
    }

    pub fn from_json(name: &str, json: &str) -> Result<Self, CatalogError> {
        let expression: Expression =
            serde_json::from_str(json).map_err(|source| CatalogError::Json {
                name: name.to_string(),
                source,
            })?;
        if expression.kind != EXPRESSION_TYPE {
            return Err(CatalogError::InvalidExpression(format!(
                "{}: unexpected Type '{}'",
                name, expression.kind
            )));
        }
        if let Some(bad) = expression.parameters.iter().find(|p| !p.value.is_finite()) {
            return Err(CatalogError::InvalidExpression(format!(
                "{}: non-finite value for {}",
                name, bad.id
            )));
        }
        Ok(expression)
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.iter().all(ExpressionParameter::is_noop)
    }
}

// ── Catalog ────────────────────────────────────────────

/// Named expressions available to one character.
#[derive(Debug, Clone, Default)]
pub struct ExpressionCatalog {
    expressions: HashMap<String, Arc<Expression>>,
}

impl ExpressionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, expression: Expression) {
        self.expressions.insert(name.into(), Arc::new(expression));
    }

    pub fn get(&self, name: &str) -> Option<Arc<Expression>> {
        self.expressions.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.expressions.contains_key(name)
    }

    /// Expression names, sorted for stable presentation.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.expressions.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    /// Load every `*.exp3.json` directly inside `dir`, keyed by file stem
    /// (`smile.exp3.json` → `smile`).
    pub fn from_dir(dir: &Path) -> Result<Self, CatalogError> {
        let io_err = |source: std::io::Error| CatalogError::Io {
            path: dir.display().to_string(),
            source,
        };
        let mut catalog = Self::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(name) = file_name.strip_suffix(EXP3_SUFFIX) else {
                continue;
            };
            let json = std::fs::read_to_string(&path).map_err(|source| CatalogError::Io {
                path: path.display().to_string(),
                source,
            })?;
            let expression = Expression::from_json(name, &json)?;
            debug!(
                "[Expression] Loaded '{}' ({} parameters)",
                name,
                expression.parameters.len()
            );
            catalog.insert(name, expression);
        }
        info!(
            "[Expression] Loaded {} expressions from {}",
            catalog.len(),
            dir.display()
        );
        Ok(catalog)
    }

    /// Built-in preset set for the Hiyori rig: eleven Natori-derived
    /// expressions remapped to Hiyori's parameters plus nine custom ones.
    pub fn hiyori() -> Self {
        let mut c = Self::new();

        c.insert("normal", Expression::additive(&[]));
        c.insert(
            "smile",
            Expression::additive(&[
                ("ParamEyeLOpen", -1.0),
                ("ParamEyeLSmile", 1.0),
                ("ParamEyeROpen", -1.0),
                ("ParamEyeRSmile", 1.0),
                ("ParamBrowLForm", 1.0),
            ]),
        );
        c.insert(
            "angry",
            Expression::additive(&[
                ("ParamEyeLOpen", -0.3),
                ("ParamEyeROpen", -0.3),
                ("ParamBrowLX", 0.3),
                ("ParamBrowRX", 0.3),
                ("ParamBrowLAngle", -0.4),
                ("ParamBrowRAngle", -0.4),
                ("ParamBrowLForm", -1.0),
                ("ParamBrowRForm", -1.0),
                ("ParamMouthForm", -2.0),
            ]),
        );
        c.insert(
            "sad",
            Expression::additive(&[
                ("ParamEyeLOpen", -0.3),
                ("ParamEyeROpen", -0.3),
                ("ParamBrowLForm", -1.0),
                ("ParamBrowRForm", -1.0),
                ("ParamMouthForm", -1.0),
            ]),
        );
        c.insert(
            "surprised",
            Expression::additive(&[
                ("ParamEyeLOpen", 0.3),
                ("ParamEyeROpen", 0.3),
                ("ParamEyeBallForm", -1.0),
                ("ParamBrowLY", 0.2),
                ("ParamBrowRY", 0.2),
                ("ParamBrowLX", -0.1),
                ("ParamBrowRX", -0.1),
                ("ParamBrowLAngle", 0.1),
                ("ParamBrowRAngle", 0.1),
                ("ParamMouthForm", -3.0),
                ("ParamMouthOpenY", 0.2),
            ]),
        );
        c.insert(
            "blushing",
            Expression::additive(&[
                ("ParamBrowLForm", -1.0),
                ("ParamBrowRForm", -1.0),
                ("ParamMouthForm", -2.0),
                ("ParamMouthOpenY", 0.2),
                ("ParamCheek", 1.0),
            ]),
        );
        c.insert(
            "excited",
            Expression::additive(&[
                ("ParamEyeLOpen", 0.3),
                ("ParamEyeROpen", 0.3),
                ("ParamBrowLY", -0.1),
                ("ParamBrowRY", -0.1),
                ("ParamMouthForm", 1.0),
                ("ParamMouthOpenY", 0.2),
            ]),
        );
        c.insert(
            "cheerful",
            Expression::additive(&[
                ("ParamEyeLOpen", 0.1),
                ("ParamEyeROpen", 0.1),
                ("ParamBrowLY", 0.1),
                ("ParamBrowRY", 0.1),
                ("ParamBrowLAngle", 0.1),
                ("ParamBrowRAngle", 0.1),
                ("ParamMouthForm", 1.0),
            ]),
        );
        c.insert(
            "frustrated",
            Expression::additive(&[
                ("ParamBrowLForm", -1.0),
                ("ParamBrowRForm", -1.0),
                ("ParamMouthForm", -2.0),
                ("ParamMouthOpenY", 0.2),
            ]),
        );
        c.insert(
            "amazed",
            Expression::additive(&[
                ("ParamEyeLOpen", 0.2),
                ("ParamEyeROpen", 0.2),
                ("ParamBrowLY", 0.2),
                ("ParamBrowRY", 0.2),
                ("ParamBrowLX", -0.1),
                ("ParamBrowRX", -0.1),
                ("ParamBrowLAngle", 0.1),
                ("ParamBrowRAngle", 0.1),
                ("ParamMouthForm", -3.0),
            ]),
        );
        c.insert(
            "sleepy",
            Expression::additive(&[
                ("ParamEyeLOpen", -1.0),
                ("ParamEyeROpen", -1.0),
                ("ParamBrowLForm", 1.0),
                ("ParamBrowRForm", 1.0),
                ("ParamMouthForm", -3.0),
                ("ParamMouthOpenY", 0.2),
            ]),
        );

        // Custom
        c.insert(
            "think",
            Expression::additive(&[
                ("ParamEyeLOpen", -0.4),
                ("ParamEyeROpen", -0.4),
                ("ParamBrowLY", 0.1),
                ("ParamBrowRY", -0.1),
            ]),
        );
        c.insert(
            "shy",
            Expression::additive(&[
                ("ParamEyeLSmile", 0.4),
                ("ParamEyeRSmile", 0.4),
                ("ParamEyeLOpen", -0.4),
                ("ParamEyeROpen", -0.4),
                ("ParamBrowLY", -0.1),
                ("ParamBrowRY", -0.1),
                ("ParamMouthForm", 0.3),
                ("ParamCheek", 0.8),
            ]),
        );
        c.insert(
            "smug",
            Expression::additive(&[
                ("ParamEyeLSmile", 0.5),
                ("ParamEyeRSmile", 0.5),
                ("ParamEyeLOpen", -0.3),
                ("ParamEyeROpen", -0.3),
                ("ParamBrowLY", 0.2),
                ("ParamBrowRY", 0.4),
                ("ParamMouthForm", 0.5),
            ]),
        );
        c.insert(
            "cry",
            Expression::additive(&[
                ("ParamEyeLOpen", -0.6),
                ("ParamEyeROpen", -0.6),
                ("ParamEyeLSmile", 0.6),
                ("ParamEyeRSmile", 0.6),
                ("ParamBrowLY", -0.6),
                ("ParamBrowRY", -0.6),
                ("ParamBrowLAngle", -0.5),
                ("ParamBrowRAngle", -0.5),
                ("ParamMouthForm", -0.4),
                ("ParamMouthOpenY", 0.4),
            ]),
        );
        c.insert(
            "laugh",
            Expression::additive(&[
                ("ParamEyeLSmile", 1.0),
                ("ParamEyeRSmile", 1.0),
                ("ParamBrowLY", 0.4),
                ("ParamBrowRY", 0.4),
                ("ParamMouthForm", 1.0),
                ("ParamMouthOpenY", 0.7),
                ("ParamCheek", 0.5),
            ]),
        );
        c.insert(
            "confused",
            Expression::additive(&[
                ("ParamEyeLOpen", -0.2),
                ("ParamEyeROpen", -0.4),
                ("ParamBrowLY", 0.3),
                ("ParamBrowRY", -0.2),
                ("ParamMouthForm", -0.2),
            ]),
        );
        c.insert(
            "fear",
            Expression::additive(&[
                ("ParamEyeLOpen", 0.3),
                ("ParamEyeROpen", 0.3),
                ("ParamBrowLY", 0.5),
                ("ParamBrowRY", 0.5),
                ("ParamBrowLAngle", -0.5),
                ("ParamBrowRAngle", -0.5),
                ("ParamMouthOpenY", 0.3),
                ("ParamMouthForm", -0.3),
            ]),
        );
        c.insert(
            "relaxed",
            Expression::additive(&[
                ("ParamEyeLOpen", -0.3),
                ("ParamEyeROpen", -0.3),
                ("ParamEyeLSmile", 0.3),
                ("ParamEyeRSmile", 0.3),
                ("ParamBrowLY", 0.1),
                ("ParamBrowRY", 0.1),
                ("ParamMouthForm", 0.2),
            ]),
        );
        c.insert(
            "disgust",
            Expression::additive(&[
                ("ParamEyeLOpen", -0.4),
                ("ParamEyeROpen", -0.4),
                ("ParamBrowLY", -0.2),
                ("ParamBrowRY", -0.2),
                ("ParamBrowLAngle", -0.4),
                ("ParamBrowRAngle", -0.4),
                ("ParamMouthForm", -0.7),
                ("ParamMouthOpenY", 0.2),
            ]),
        );

        c
    }
}
