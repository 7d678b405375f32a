//! Filter expressions for the command line

use crate::record::{HardwareContext, RecordStatus, TechniqueFamily};
use crate::store::{HardwareSelector, RecordFilter, Scope};

/// Parse `key=value[,key=value...]` into a [`RecordFilter`]
///
/// Keys: `subject`, `technique`, `variant`, `processor` (or `hardware`),
/// `provider`, `framework`, `status`, `metric`, `scope`. `processor` and
/// `provider` match on the parts given, so `processor=SPR` also selects
/// records that name an execution provider. `processor=default` selects
/// records without a hardware context. An empty string matches all.
pub fn parse_filter(expr: &str) -> Result<RecordFilter, String> {
    let mut filter = RecordFilter::new();
    let mut processor = None;
    let mut provider = None;
    let mut default_hardware = false;

    for term in expr.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let (key, value) = term
            .split_once('=')
            .ok_or_else(|| format!("Invalid filter term: {term}. Expected key=value"))?;
        let value = value.trim();

        match key.trim().to_lowercase().as_str() {
            "subject" | "model" => filter = filter.subject(value),
            "technique" | "family" | "technique_family" => {
                filter = filter.technique(value.parse::<TechniqueFamily>()?);
            }
            "variant" => filter = filter.variant(value),
            "processor" | "hardware" if value.eq_ignore_ascii_case("default") => {
                default_hardware = true;
            }
            "processor" | "hardware" => processor = Some(value),
            "provider" | "execution_provider" => provider = Some(value),
            "framework" => filter = filter.framework(value),
            "status" => {
                let status = match value.to_lowercase().as_str() {
                    "measured" => RecordStatus::Measured,
                    "pending" => RecordStatus::Pending,
                    _ => return Err(format!("Unknown status: {value}. Valid: measured, pending")),
                };
                filter = filter.status(status);
            }
            "metric" => filter = filter.metric(value),
            "scope" => {
                let scope = match value.to_lowercase().as_str() {
                    "active" => Scope::Active,
                    "history" | "all" => Scope::History,
                    _ => return Err(format!("Unknown scope: {value}. Valid: active, history")),
                };
                filter = filter.scope(scope);
            }
            other => return Err(format!("Unknown filter key: {other}")),
        }
    }

    if default_hardware {
        if processor.is_some() || provider.is_some() {
            return Err("processor=default cannot be combined with a hardware value".into());
        }
        filter = filter.hardware(HardwareSelector::Default);
    } else if let Some(context) = HardwareContext::from_parts(processor, provider) {
        filter = filter.hardware(HardwareSelector::Partial(context));
    }

    Ok(filter)
}
