//! The résumé profile as stored by the hosted backend and as consumed by the
//! renderer.
//!
//! `ProfileRow` mirrors the store's loosely typed row (Spanish column names,
//! collections as raw JSON). `Profile::from_row` is the single validation
//! boundary: after it, every optional field is an explicit `Option`, every
//! collection is a typed `Vec` (empty when absent) and nothing downstream
//! re-checks shapes.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

// ────────────────────────────────────────────────────────────────────────────
// Store row
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileRow {
    #[serde(default)]
    pub id: Value,
    pub nombre_completo: String,
    #[serde(default, deserialize_with = "opt_text")]
    pub titulo_profesional: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub resumen: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub correo: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub telefono: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub ubicacion: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub fecha_nacimiento: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub nacionalidad: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub sitio_web: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub linkedin_url: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub github_url: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub portafolio_url: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub foto_url: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub disponibilidad: Option<String>,
    #[serde(default)]
    pub salario_deseado: Option<Value>,
    #[serde(default, deserialize_with = "opt_flag")]
    pub trabajo_remoto: Option<bool>,
    #[serde(default)]
    pub idiomas: Option<Value>,
    #[serde(default)]
    pub habilidades: Option<Value>,
    #[serde(default)]
    pub soft_skills: Option<Value>,
    #[serde(default)]
    pub intereses: Option<Value>,
    #[serde(default)]
    pub experiencia: Option<Value>,
    #[serde(default)]
    pub educacion: Option<Value>,
    #[serde(default)]
    pub proyectos: Option<Value>,
    #[serde(default)]
    pub certificaciones: Option<Value>,
    #[serde(default)]
    pub redes_extra: Option<Value>,
    #[serde(default)]
    pub datos_extra: Option<Value>,
    #[serde(default, deserialize_with = "opt_text")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub creado_en: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub actualizado_en: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Typed collection records
// ────────────────────────────────────────────────────────────────────────────

/// One job. `end = None` means the position is ongoing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(rename = "empresa", deserialize_with = "text")]
    pub company: String,
    #[serde(rename = "cargo", deserialize_with = "text")]
    pub role: String,
    #[serde(rename = "ubicacion", default, deserialize_with = "opt_text")]
    pub location: Option<String>,
    #[serde(rename = "inicio", default, deserialize_with = "opt_text")]
    pub start: Option<String>,
    #[serde(rename = "fin", default, deserialize_with = "opt_text")]
    pub end: Option<String>,
    #[serde(rename = "descripcion", default, deserialize_with = "opt_text")]
    pub description: Option<String>,
    #[serde(rename = "logros", default, deserialize_with = "text_list")]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(rename = "institucion", deserialize_with = "text")]
    pub institution: String,
    #[serde(rename = "titulo", default, deserialize_with = "opt_text")]
    pub degree: Option<String>,
    #[serde(rename = "inicio", default, deserialize_with = "opt_text")]
    pub start: Option<String>,
    #[serde(rename = "fin", default, deserialize_with = "opt_text")]
    pub end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    #[serde(rename = "nombre", deserialize_with = "text")]
    pub name: String,
    #[serde(rename = "rol", default, deserialize_with = "opt_text")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub url: Option<String>,
    #[serde(rename = "descripcion", default, deserialize_with = "opt_text")]
    pub description: Option<String>,
    #[serde(rename = "tecnologias", default, deserialize_with = "text_list")]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificationEntry {
    #[serde(rename = "nombre", deserialize_with = "text")]
    pub name: String,
    #[serde(rename = "entidad", default, deserialize_with = "opt_text")]
    pub issuer: Option<String>,
    #[serde(rename = "fecha", default, deserialize_with = "opt_text")]
    pub date: Option<String>,
    #[serde(rename = "credencial_url", default, deserialize_with = "opt_text")]
    pub credential_url: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Normalized profile
// ────────────────────────────────────────────────────────────────────────────

/// The single résumé record, immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Profile {
    pub id: String,
    pub full_name: String,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub birth_date: Option<String>,
    pub nationality: Option<String>,
    pub website: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub photo_url: Option<String>,
    pub availability: Option<String>,
    pub desired_salary: Option<f64>,
    pub remote_work: bool,
    pub languages: Vec<String>,
    pub skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub interests: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<CertificationEntry>,
    /// Label → URL, in the order the store returned them.
    pub extra_links: IndexMap<String, String>,
    /// Free-form data; never rendered.
    pub extra_data: Option<Value>,
    pub slug: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Profile {
    /// Validates and defaults a raw store row. Never fails: malformed
    /// collection entries are dropped (and logged), absent collections
    /// become empty.
    pub fn from_row(row: ProfileRow) -> Self {
        Profile {
            id: opaque_id(row.id),
            full_name: row.nombre_completo,
            title: row.titulo_profesional,
            summary: row.resumen,
            email: row.correo,
            phone: row.telefono,
            location: row.ubicacion,
            birth_date: row.fecha_nacimiento,
            nationality: row.nacionalidad,
            website: row.sitio_web,
            linkedin_url: row.linkedin_url,
            github_url: row.github_url,
            portfolio_url: row.portafolio_url,
            photo_url: row.foto_url,
            availability: row.disponibilidad,
            desired_salary: row.salario_deseado.as_ref().and_then(number),
            remote_work: row.trabajo_remoto.unwrap_or(false),
            languages: string_collection("idiomas", row.idiomas),
            skills: string_collection("habilidades", row.habilidades),
            soft_skills: string_collection("soft_skills", row.soft_skills),
            interests: string_collection("intereses", row.intereses),
            experience: record_collection("experiencia", row.experiencia),
            education: record_collection("educacion", row.educacion),
            projects: record_collection("proyectos", row.proyectos),
            certifications: record_collection("certificaciones", row.certificaciones),
            extra_links: link_map(row.redes_extra),
            extra_data: row.datos_extra.filter(|v| !v.is_null()),
            slug: row.slug,
            created_at: row.creado_en,
            updated_at: row.actualizado_en,
        }
    }
}

fn opaque_id(id: Value) -> String {
    match id {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Accepts JSON numbers and numeric strings; anything else is absent.
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn entries(column: &str, value: Option<Value>) -> Vec<Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items,
        Some(other) => {
            warn!("Column '{column}' is not a list (got {other}); treating as empty");
            Vec::new()
        }
    }
}

fn string_collection(column: &str, value: Option<Value>) -> Vec<String> {
    entries(column, value)
        .into_iter()
        .filter_map(|item| match scalar_text(&item) {
            Some(s) => Some(s),
            None => {
                warn!("Dropping non-text entry in '{column}': {item}");
                None
            }
        })
        .collect()
}

fn record_collection<T: for<'de> Deserialize<'de>>(column: &str, value: Option<Value>) -> Vec<T> {
    entries(column, value)
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<T>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Dropping malformed entry in '{column}': {e}");
                None
            }
        })
        .collect()
}

fn link_map(value: Option<Value>) -> IndexMap<String, String> {
    match value {
        None | Some(Value::Null) => IndexMap::new(),
        Some(Value::Object(map)) => map
            .into_iter()
            .filter_map(|(label, url)| match url {
                Value::String(url) => Some((label, url)),
                other => {
                    warn!("Dropping extra link '{label}' with non-text URL: {other}");
                    None
                }
            })
            .collect(),
        Some(other) => {
            warn!("Column 'redes_extra' is not a mapping (got {other}); treating as empty");
            IndexMap::new()
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient field deserializers (dates may arrive as bare years, etc.)
// ────────────────────────────────────────────────────────────────────────────

fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = Value::deserialize(d)?;
    scalar_text(&value).ok_or_else(|| serde::de::Error::custom(format!("expected text, got {value}")))
}

fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(scalar_text(&Value::deserialize(d)?))
}

/// Booleans, plus the text forms a hand-edited row tends to carry.
fn opt_flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Bool(b) => Some(b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "si" | "sí" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        _ => None,
    })
}

fn text_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => items.iter().filter_map(scalar_text).collect(),
        _ => Vec::new(),
    })
}
