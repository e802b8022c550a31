//! Parameter list building. Maps every raw parameter of one function or
//! callback and pairs count parameters with the buffers they size.

use crate::config::Conventions;
use crate::error::{Error, Result};
use crate::model::{ParamDesc, RETURN_TARGET};
use crate::typemap::{self, Expr, RawType};

/// One raw parameter after type mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedParam {
    pub name: String,
    /// `None` for count parameters, which never appear in a wrapper
    /// signature.
    pub wrapper: Option<String>,
    pub raw: String,
    /// `None` for count parameters.
    pub forward: Option<Expr>,
    pub backward: Expr,
    pub out: bool,
    /// Target of a count parameter (a buffer name or `return`).
    pub count_for: Option<String>,
    /// Count parameter sizing this buffer.
    pub counted_by: Option<String>,
}

impl MappedParam {
    pub fn is_count(&self) -> bool {
        self.count_for.is_some()
    }

    /// Raw type with one pointer level removed: the storage type of an
    /// output parameter.
    pub fn pointee(&self) -> &str {
        self.raw.strip_suffix('*').unwrap_or(&self.raw)
    }

    /// Wrapper-facing `Type name` declaration, if the parameter is visible.
    pub fn declaration(&self) -> Option<String> {
        self.wrapper.as_ref().map(|ty| format!("{ty} {}", self.name))
    }
}

/// Map `params` in order. A count parameter is recorded as derived from its
/// buffer's length; the buffer it names, which must come later, is mapped as
/// a counted view. Only one count may be pending at a time.
pub fn build_params(owner: &str, params: &[ParamDesc], conv: &Conventions) -> Result<Vec<MappedParam>> {
    let mut mapped = Vec::with_capacity(params.len());
    // (count parameter, buffer it sizes)
    let mut pending: Option<(&str, &str)> = None;

    for p in params {
        if let Some(target) = p.count_for.as_deref() {
            if let Some((count, buffer)) = pending {
                return Err(Error::InvalidCountRelation {
                    owner: owner.to_string(),
                    reason: format!("`{}` counts `{target}` while `{count}` still waits for `{buffer}`", p.name),
                });
            }
            if target != RETURN_TARGET {
                pending = Some((p.name.as_str(), target));
            }
            mapped.push(MappedParam {
                name: p.name.clone(),
                wrapper: None,
                raw: p.ty.clone(),
                forward: None,
                backward: Expr::template(format!("{target}.size()")),
                out: p.out,
                count_for: Some(target.to_string()),
                counted_by: None,
            });
            continue;
        }

        let counted_by = match pending {
            Some((count, buffer)) if buffer == p.name => {
                pending = None;
                Some(count)
            }
            _ => None,
        };
        let raw = RawType::new(&p.ty, p.enum_tag.as_deref()).counted_by(counted_by);
        let m = typemap::map_type(raw, conv, &format!("{owner}.{}", p.name))?;
        tracing::trace!(owner, param = %p.name, wrapper = %m.wrapper, "mapped parameter");

        mapped.push(MappedParam {
            name: p.name.clone(),
            wrapper: Some(m.wrapper),
            raw: p.ty.clone(),
            forward: Some(m.forward),
            backward: m.backward,
            out: p.out,
            count_for: None,
            counted_by: counted_by.map(str::to_string),
        });
    }

    if let Some((count, buffer)) = pending {
        return Err(Error::InvalidCountRelation {
            owner: owner.to_string(),
            reason: format!("`{count}` counts `{buffer}`, which never follows it"),
        });
    }
    Ok(mapped)
}

/// The parameter sizing the return value, if any.
pub fn return_count(params: &[MappedParam]) -> Option<&MappedParam> {
    params
        .iter()
        .find(|p| p.out && p.count_for.as_deref() == Some(RETURN_TARGET))
}
