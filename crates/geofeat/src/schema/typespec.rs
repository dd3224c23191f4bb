// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The compact textual type-spec language.
//!
//! A spec is a comma-separated list of columns:
//!
//! ```text
//! *geom:Point:srid=4326,name:String,pop:Integer:nillable
//! ```
//!
//! A leading `*` marks the default geometry. The type token is one of
//! the fixed vocabulary (`String`, `Integer`, `Long`, `Double`, `Float`,
//! `Boolean`, `Date`, `Geometry`, `Point`, `LineString`, `Polygon`,
//! `MultiPoint`, `MultiLineString`, `MultiPolygon`,
//! `GeometryCollection`) or a qualified type name resolvable in a
//! caller-provided registry; an omitted token means `String`. Recognized
//! hints are `nillable` and `srid=<int>`.
//!
//! Round-tripping `type_spec(create_type(ns, name, s)) == s` holds for
//! specs built from the fixed vocabulary. Unregistered bindings
//! serialize via their qualified type name and only parse back when that
//! name is present in the registry. The serializer omits a redundant `*`
//! when the default geometry is the first geometry column in declaration
//! order, the same column the builder would auto-select.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

use crate::geom::Crs;

use super::builder::TypeBuilder;
use super::{
    Binding, FeatureType, Name, Occurs, PropertyDescriptor, PropertyType, SchemaError, TypeError,
    TypeFactory, TypeKind,
};

/// Parse a type spec into a feature type, using the fixed vocabulary
/// only.
pub fn create_type(namespace: &str, name: &str, spec: &str) -> Result<FeatureType, SchemaError> {
    create_type_with(&TypeFactory::new(), &HashMap::new(), namespace, name, spec)
}

/// Parse a type spec, resolving non-vocabulary tokens against
/// `registry` (keyed by the token string).
pub fn create_type_with(
    factory: &TypeFactory,
    registry: &HashMap<String, Arc<PropertyType>>,
    namespace: &str,
    name: &str,
    spec: &str,
) -> Result<FeatureType, SchemaError> {
    let mut builder = TypeBuilder::with_factory(factory.clone(), name).namespace(namespace);

    for raw in spec.split(',') {
        let entry = raw.trim();
        if entry.is_empty() {
            continue;
        }
        let (is_default_geometry, entry) = match entry.strip_prefix('*') {
            Some(rest) => (true, rest),
            None => (false, entry),
        };

        let mut parts = entry.splitn(3, ':');
        let column = parts.next().unwrap_or("").trim();
        let token = parts.next().unwrap_or("").trim();
        let hints = parts.next().unwrap_or("").trim();

        let mut nillable = false;
        let mut crs = None;
        for hint in hints.split(';').map(str::trim).filter(|h| !h.is_empty()) {
            if hint == "nillable" {
                nillable = true;
            } else if let Some(srid) = hint.strip_prefix("srid=") {
                crs = Some(Crs::decode(srid).map_err(TypeError::from)?);
            } else {
                return Err(TypeError::UnknownTypeToken {
                    token: hint.to_string(),
                }
                .into());
            }
        }

        let ty = resolve_token(registry, token, crs)?;
        let descriptor = PropertyDescriptor::new(
            Name::local(column),
            ty,
            1,
            Occurs::Bounded(1),
            nillable,
            None,
        )?;
        builder = builder.add_descriptor(Arc::new(descriptor));
        if is_default_geometry {
            builder = builder.default_geometry(Name::local(column));
        }
    }

    builder.build_feature_type(false)
}

/// Serialize a feature type back into the spec language.
pub fn type_spec(ty: &FeatureType) -> String {
    let first_geometry = ty
        .descriptors()
        .iter()
        .find(|d| d.is_geometry())
        .map(|d| d.name().clone());
    let default_geometry = ty.default_geometry();

    let mut out = String::new();
    for (i, d) in ty.descriptors().iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let is_default = default_geometry == Some(d.name());
        if is_default && first_geometry.as_ref() != Some(d.name()) {
            out.push('*');
        }
        out.push_str(d.name().local_part());
        out.push(':');
        match d.ty().binding() {
            Some(binding) => out.push_str(binding.token()),
            // Non-vocabulary binding: qualified type name.
            None => {
                let _ = write!(out, "{}", d.ty().name());
            }
        }
        let mut hints = Vec::new();
        if d.is_nillable() {
            hints.push("nillable".to_string());
        }
        if let Some(crs) = d.ty().crs() {
            hints.push(format!("srid={}", crs.code()));
        }
        if !hints.is_empty() {
            out.push(':');
            out.push_str(&hints.join(";"));
        }
    }
    out
}

fn resolve_token(
    registry: &HashMap<String, Arc<PropertyType>>,
    token: &str,
    crs: Option<Crs>,
) -> Result<Arc<PropertyType>, TypeError> {
    let token = if token.is_empty() { "String" } else { token };
    if let Some(binding) = Binding::from_token(token) {
        return Ok(match binding {
            Binding::Geometry(kind) => super::builder::synthesize_geometry(kind, crs),
            Binding::Scalar(kind) => super::builder::synthesize_scalar(kind),
        });
    }
    if let Some(ty) = registry.get(token) {
        // Re-pin a registered geometry type when an srid hint is given.
        if let (TypeKind::Geometry { binding, .. }, Some(_)) = (ty.kind(), crs) {
            return Ok(super::builder::synthesize_geometry(*binding, crs));
        }
        return Ok(ty.clone());
    }
    Err(TypeError::UnknownTypeToken {
        token: token.to_string(),
    })
}
