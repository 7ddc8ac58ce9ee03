pub mod format;
pub mod identifier;
pub mod record;

pub use format::{RiskBadge, RiskTier, format_currency, format_currency_opt, risk_badge};
pub use identifier::{IdentifierError, IdentifierKind, mask_identifier, validate_identifier};
pub use record::{
    Attachment, ErrorBody, FindingRecord, FindingsResponse, IDENTIFIER_FIELD, ImportAck,
    ImportRequest, SummaryRow,
};
