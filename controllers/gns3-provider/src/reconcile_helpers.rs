//! Helper functions for common reconciliation patterns
//!
//! Status-code policy and identity checks shared by every lifecycle operation.

use crate::error::{Operation, ProviderError};
use crate::schema::{PROJECT_FIELD, ResourceSchema};
use crate::state::ResourceData;
use gns3_client::{ApiResponse, StatusCode};

/// Require exactly `expected`; anything else is a rejected request carrying the body.
pub fn expect_status(
    operation: Operation,
    response: &ApiResponse,
    expected: StatusCode,
) -> Result<(), ProviderError> {
    if response.status == expected {
        Ok(())
    } else {
        Err(rejected(operation, response))
    }
}

/// Rejected-request error carrying the response status and body
pub fn rejected(operation: Operation, response: &ApiResponse) -> ProviderError {
    ProviderError::Rejected {
        operation,
        status: response.status,
        body: response.body_snippet(),
    }
}

/// Identity of an instance that must already exist remotely
pub fn require_identity<D: ResourceData + ?Sized>(
    operation: Operation,
    data: &D,
) -> Result<String, ProviderError> {
    data.identity()
        .map(str::to_string)
        .ok_or(ProviderError::MissingIdentity { operation })
}

/// Owning project of an instance. Required in every kind.
pub fn project_id<D: ResourceData + ?Sized>(
    schema: &ResourceSchema,
    data: &D,
) -> Result<String, ProviderError> {
    match data.get_string(PROJECT_FIELD)? {
        Some(project) if !project.is_empty() => Ok(project.to_string()),
        _ => Err(ProviderError::MissingAttribute {
            kind: schema.type_name.to_string(),
            field: PROJECT_FIELD.to_string(),
        }),
    }
}
