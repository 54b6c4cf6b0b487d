//! Function signatures and exact-type overload resolution.
//!
//! Every native has a small fixed arity, so resolution is an exact match on
//! the parameter-type sequence: no widening, no defaults, no variadics.

use std::fmt;

use crate::error::{Result, SketchError};
use crate::types::{format_types, TypeDesc};

/// One named, typed parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    /// Shown in diagnostics only; never used for matching.
    pub name: &'static str,
    pub ty: TypeDesc,
}

/// Parameter list and return type of one overload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    params: Vec<Param>,
    ret: TypeDesc,
}

impl Signature {
    /// A signature returning `ret`; add parameters with [`Signature::param`].
    pub fn returns(ret: TypeDesc) -> Self {
        Self {
            params: Vec::new(),
            ret,
        }
    }

    /// Append a parameter.
    pub fn param(mut self, name: &'static str, ty: TypeDesc) -> Self {
        self.params.push(Param { name, ty });
        self
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn param_types(&self) -> Vec<TypeDesc> {
        self.params.iter().map(|p| p.ty).collect()
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn return_type(&self) -> TypeDesc {
        self.ret
    }

    /// Whether a call with these argument types matches exactly.
    pub fn accepts(&self, args: &[TypeDesc]) -> bool {
        self.params.len() == args.len() && self.params.iter().zip(args).all(|(p, a)| p.ty == *a)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self
            .params
            .iter()
            .map(|p| format!("{}: {}", p.name, p.ty))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "({}) -> {}", params, self.ret)
    }
}

/// The overload chosen for a call.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    /// Position of the signature in its overload set.
    pub index: usize,
    pub signature: &'a Signature,
}

/// All overloads of one exposed name.
///
/// Non-empty, and no two signatures share a parameter-type sequence.
#[derive(Debug, Clone)]
pub struct OverloadSet {
    signatures: Vec<Signature>,
}

impl OverloadSet {
    pub fn new(signatures: Vec<Signature>) -> Result<Self> {
        if signatures.is_empty() {
            return Err(SketchError::Build {
                message: "Overload set has no signatures".to_string(),
                help: None,
            });
        }

        for (i, sig) in signatures.iter().enumerate() {
            if let Some(dup) = signatures[..i]
                .iter()
                .find(|earlier| earlier.param_types() == sig.param_types())
            {
                return Err(SketchError::Build {
                    message: format!("Ambiguous overloads {} and {}", dup, sig),
                    help: Some("Overloads must differ in their parameter types".to_string()),
                });
            }
        }

        Ok(Self { signatures })
    }

    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Find the signature matching `args` exactly.
    ///
    /// `name` is only used to label the error.
    pub fn resolve(&self, name: &str, args: &[TypeDesc]) -> Result<Resolved<'_>> {
        self.signatures
            .iter()
            .enumerate()
            .find(|(_, sig)| sig.accepts(args))
            .map(|(index, signature)| Resolved { index, signature })
            .ok_or_else(|| SketchError::TypeMismatch {
                name: name.to_string(),
                attempted: format_types(args),
                help: Some(self.describe(name)),
            })
    }

    /// One line per overload, for diagnostics and listings.
    pub fn describe(&self, name: &str) -> String {
        let lines = self
            .signatures
            .iter()
            .map(|sig| format!("  {}{}", name, sig))
            .collect::<Vec<_>>()
            .join("\n");
        format!("available signatures:\n{}", lines)
    }
}
