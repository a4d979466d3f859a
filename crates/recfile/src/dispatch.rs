use std::io::Write;

use recfile_config::OutputConfig;
use recfile_store::{find_by_id, insert, load, remove_at, save, StoreError};
use recfile_types::{
    Operation, Record, Request, FILE_NAME_FLAG, ID_FLAG, ITEM_FLAG, OPERATION_FLAG,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::flags::Flags;
use crate::output::{emit, format_already_exists, format_not_found, render_json};

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("-{0} flag has to be specified")]
    MissingFlag(&'static str),
    #[error("Operation {0} not allowed!")]
    InvalidOperation(String),
    #[error("Malformed -item value: {0}")]
    MalformedItem(#[source] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn required<'a>(value: &'a Option<String>, flag: &'static str) -> Result<&'a str, DispatchError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(DispatchError::MissingFlag(flag)),
    }
}

/// Checks the flags and turns them into a [`Request`].
///
/// Checks run in a fixed order: operation present, operation known, file name
/// present, then whatever the chosen operation needs.
pub fn validate(flags: &Flags) -> Result<Request, DispatchError> {
    let name = required(&flags.operation, OPERATION_FLAG)?;
    let operation = Operation::from_name(name)
        .ok_or_else(|| DispatchError::InvalidOperation(name.to_string()))?;
    let file_name = required(&flags.file_name, FILE_NAME_FLAG)?.to_string();

    let request = match operation {
        Operation::List => Request::List { file_name },
        Operation::Add => {
            let raw = required(&flags.item, ITEM_FLAG)?;
            let item = Record::from_json(raw).map_err(DispatchError::MalformedItem)?;
            Request::Add { file_name, item }
        }
        Operation::Remove => Request::Remove {
            file_name,
            id: required(&flags.id, ID_FLAG)?.to_string(),
        },
        Operation::FindById => Request::FindById {
            file_name,
            id: required(&flags.id, ID_FLAG)?.to_string(),
        },
    };
    Ok(request)
}

/// Validates `flags` and runs the resulting request against its file.
pub fn dispatch(
    flags: &Flags,
    options: &OutputConfig,
    out: &mut dyn Write,
) -> Result<(), DispatchError> {
    let request = validate(flags)?;
    perform(&request, options, out)
}

/// Runs a validated request. The store is loaded fresh and only rewritten by
/// a successful add or remove.
pub fn perform(
    request: &Request,
    options: &OutputConfig,
    out: &mut dyn Write,
) -> Result<(), DispatchError> {
    let path = request.path();
    let operation = request.operation();
    debug!(
        %operation,
        mutating = operation.is_mutating(),
        path = %path.display(),
        "performing request"
    );

    match request {
        Request::List { .. } => {
            let records = load(path)?;
            let bytes = render_json(&records, options)?;
            emit(out, &bytes, options)?;
        }
        Request::Add { item, .. } => {
            let mut records = load(path)?;
            if find_by_id(&item.id, &records).is_some() {
                warn!(id = %item.id, "record already exists, not adding");
                emit(out, format_already_exists(&item.id).as_bytes(), options)?;
            } else {
                insert(&mut records, item.clone());
                save(&records, path)?;
                info!(id = %item.id, count = records.len(), "added record");
            }
        }
        Request::Remove { id, .. } => {
            let records = load(path)?;
            match find_by_id(id, &records) {
                Some(position) => {
                    let records = remove_at(records, position);
                    save(&records, path)?;
                    info!(id = %id, count = records.len(), "removed record");
                }
                None => {
                    warn!(id = %id, "record not found, nothing removed");
                    emit(out, format_not_found(id).as_bytes(), options)?;
                }
            }
        }
        Request::FindById { id, .. } => {
            let records = load(path)?;
            // Unlike remove, a missing id prints nothing.
            if let Some(position) = find_by_id(id, &records) {
                let bytes = render_json(&records[position], options)?;
                emit(out, &bytes, options)?;
            } else {
                debug!(id = %id, "record not found");
            }
        }
    }

    Ok(())
}
