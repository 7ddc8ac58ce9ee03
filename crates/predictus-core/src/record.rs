//! Wire types exchanged with the Predictus import and findings endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Form field carrying the CPF/CNPJ identifier.
pub const IDENTIFIER_FIELD: &str = "cpf_cnpj";

/// Form field the spreadsheet is uploaded under.
pub const ATTACHMENT_FIELD: &str = "arquivo";

/// A file sent alongside the import form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub field: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Spreadsheet attachment under the standard `arquivo` field.
    pub fn spreadsheet(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            field: ATTACHMENT_FIELD.to_string(),
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// One import form submission.
///
/// Always carries a `cpf_cnpj` field. Lives only for the duration of a
/// single submission; the same payload feeds both the import call and the
/// follow-up findings query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    fields: Vec<(String, String)>,
    attachment: Option<Attachment>,
}

impl ImportRequest {
    /// Form with only the identifier field set.
    pub fn new(cpf_cnpj: impl Into<String>) -> Self {
        Self {
            fields: vec![(IDENTIFIER_FIELD.to_string(), cpf_cnpj.into())],
            attachment: None,
        }
    }

    /// Set a form field, replacing any previous value under the same name.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
        self
    }

    /// Attach a file, replacing any earlier one.
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// The raw identifier value as submitted (mask characters included).
    pub fn identifier(&self) -> &str {
        self.field(IDENTIFIER_FIELD).unwrap_or_default()
    }

    /// Value of a text field, if set.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// All text fields in submission order.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }
}

/// One legal-process entry returned by the findings endpoint.
///
/// Spreadsheet cells arrive as strings, numbers or null, so every field is
/// kept as a raw JSON value. Columns not named here are retained in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FindingRecord {
    #[serde(rename = "N° Processo", default, skip_serializing_if = "Option::is_none")]
    pub process_number: Option<Value>,
    #[serde(rename = "Partes Ativas", default, skip_serializing_if = "Option::is_none")]
    pub active_parties: Option<Value>,
    #[serde(rename = "Partes Passivas", default, skip_serializing_if = "Option::is_none")]
    pub passive_parties: Option<Value>,
    #[serde(rename = "Classe Processual", default, skip_serializing_if = "Option::is_none")]
    pub procedural_class: Option<Value>,
    #[serde(rename = "Valor da Causa", default, skip_serializing_if = "Option::is_none")]
    pub claim_value: Option<Value>,
    #[serde(rename = "Ramo do Direito", default, skip_serializing_if = "Option::is_none")]
    pub legal_branch: Option<Value>,
    #[serde(rename = "Instância", default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<Value>,
    #[serde(rename = "Data de Distribuição", default, skip_serializing_if = "Option::is_none")]
    pub distribution_date: Option<Value>,
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    #[serde(rename = "Tutela Antecipada", default, skip_serializing_if = "Option::is_none")]
    pub provisional_relief: Option<Value>,
    #[serde(rename = "Outras Partes", default, skip_serializing_if = "Option::is_none")]
    pub other_parties: Option<Value>,
    #[serde(rename = "Julgamentos", default, skip_serializing_if = "Option::is_none")]
    pub rulings: Option<Value>,
    #[serde(rename = "1ª Movimentação", default, skip_serializing_if = "Option::is_none")]
    pub movement_1: Option<Value>,
    #[serde(rename = "2ª Movimentação", default, skip_serializing_if = "Option::is_none")]
    pub movement_2: Option<Value>,
    #[serde(rename = "3ª Movimentação", default, skip_serializing_if = "Option::is_none")]
    pub movement_3: Option<Value>,
    #[serde(rename = "Data de Atualização", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Value>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Server-side aggregation of findings by procedural class and status.
///
/// The server sends these sorted by class; consumers rely on that order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    #[serde(rename = "Classe Processual", default)]
    pub procedural_class: Option<Value>,
    #[serde(rename = "Status", default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub quantidade: Option<Value>,
    #[serde(default)]
    pub valor_total: Option<Value>,
}

/// Body of a successful `GET /achados` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FindingsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpf_cnpj: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resumo: Vec<SummaryRow>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub achados: Vec<FindingRecord>,
}

/// An explicit `null` reads the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of a successful `POST /importar` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportAck {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub mensagem: Option<String>,
}

/// Body the server sends with any non-success status.
///
/// Application errors carry `erro`; framework-raised ones (bad login,
/// expired session) carry `detail` instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub erro: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorBody {
    /// The message to show, preferring `erro`.
    pub fn message(self) -> Option<String> {
        self.erro.or(self.detail)
    }
}
