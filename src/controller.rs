//! The resource controller.
//!
//! A controller is bound to one resource collection for the life of an
//! invocation and implements the add/list/update/remove actions against an
//! [`ApiClient`]. Every remote failure is converted into a
//! [`ControllerError`] whose message is what the user sees.

use crate::api::{ApiClient, ApiError};
use crate::console::Console;
use crate::format::{print_list, FieldMap, FormattingError};
use crate::model::{singular, Action, ModelError, ObjectId, ParamSet, RemoteObject, ID_FIELD};
use serde_json::{Map, Value};
use tracing::{debug, trace};

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// The server rejected the request.
    #[error("[FATAL] {status} {reason} trying to {action} {singular} with args: {args}")]
    Rejected {
        status: u16,
        reason: String,
        action: Action,
        singular: String,
        args: String,
    },
    /// The request failed without a response.
    #[error("[FATAL] {0}")]
    Unreachable(ApiError),
    #[error("[FATAL] {0}")]
    Formatting(#[from] FormattingError),
    #[error("[FATAL] missing {0:?} field trying to {1} object")]
    MissingIdentifier(&'static str, Action),
    #[error("[FATAL] {0}")]
    InvalidIdentifier(#[from] ModelError),
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Build the body of an update.
///
/// Starts from every field of `current` except the identifier, then overlays
/// each non-null entry of `changes`. Null or missing changes keep the remote
/// value; there is no way to clear a field.
pub fn merge_update_payload(current: RemoteObject, changes: &ParamSet) -> Map<String, Value> {
    let mut payload = current.into_map();
    payload.remove(ID_FIELD);
    for (field, value) in changes.present() {
        if field != ID_FIELD {
            payload.insert(field.clone(), value.clone());
        }
    }
    payload
}

pub struct ResourceController<A, C> {
    api: A,
    console: C,
    resource_name: String,
    fields_map: FieldMap,
}

impl<A: ApiClient, C: Console> ResourceController<A, C> {
    pub fn new(api: A, console: C, resource_name: impl Into<String>) -> Self {
        Self {
            api,
            console,
            resource_name: resource_name.into(),
            fields_map: FieldMap::default(),
        }
    }

    /// Use `fields_map` for list headers instead of the default map.
    pub fn with_fields_map(mut self, fields_map: FieldMap) -> Self {
        self.fields_map = fields_map;
        self
    }

    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    /// Singular form of the resource name, for messages.
    pub fn singular(&self) -> &str {
        singular(&self.resource_name)
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    fn handle_error(&self, action: Action, params: &ParamSet, error: ApiError) -> ControllerError {
        debug!("Failed to {} {}: {:?}", action, self.singular(), error);
        match error.response() {
            Some((status, reason)) => ControllerError::Rejected {
                status: status.as_u16(),
                reason: reason.to_string(),
                action,
                singular: self.singular().to_string(),
                args: params.to_string(),
            },
            None => ControllerError::Unreachable(error),
        }
    }

    fn handle_response(&mut self, action: Action, params: &ParamSet) -> Result<(), ControllerError> {
        let message = format!(
            "Successfully {} {} with args: {}!",
            action.past_tense(),
            self.singular(),
            params
        );
        self.console.echo(&message)?;
        Ok(())
    }

    /// POST `params` to the collection.
    pub async fn create(&mut self, params: &ParamSet) -> Result<(), ControllerError> {
        let action = Action::Create;
        trace!("{} {} with {}", action.verb(), self.resource_name, params);
        match self.api.post(&self.resource_name, &params.present_map()).await {
            Ok(_) => self.handle_response(action, params),
            Err(e) => Err(self.handle_error(action, params, e)),
        }
    }

    /// GET the collection filtered by `params` and print the matches.
    ///
    /// `fields` selects the columns; every key of the first object is shown
    /// when it is `None`.
    pub async fn list(
        &mut self,
        params: &ParamSet,
        fields: Option<&[String]>,
    ) -> Result<(), ControllerError> {
        let action = Action::List;
        trace!("{} {} with {}", action.verb(), self.resource_name, params);
        let result = match self.api.get(&self.resource_name, params).await {
            Ok(result) => result,
            Err(e) => return Err(self.handle_error(action, params, e)),
        };

        if result.is_empty() {
            let message = format!("No {} found matching args: {}!", self.singular(), params);
            self.console.echo(&message)?;
            return Ok(());
        }

        print_list(&mut self.console, &result.objects, fields, &self.fields_map)?;
        Ok(())
    }

    /// DELETE the object identified by `id`. `params` only feeds messages.
    pub async fn remove(&mut self, id: &ObjectId, params: &ParamSet) -> Result<(), ControllerError> {
        let action = Action::Delete;
        trace!("{} {} {}", action.verb(), self.resource_name, id);
        match self.api.delete_object(&self.resource_name, id).await {
            Ok(()) => self.handle_response(action, params),
            Err(e) => Err(self.handle_error(action, params, e)),
        }
    }

    /// Partial update: fetch the object, overlay the supplied fields, PUT it back.
    pub async fn update(&mut self, params: &ParamSet) -> Result<(), ControllerError> {
        let action = Action::Update;
        let mut changes = params.clone();
        let id = match changes.remove(ID_FIELD) {
            Some(Value::Null) | None => {
                return Err(ControllerError::MissingIdentifier(ID_FIELD, action))
            }
            Some(value) => ObjectId::try_from(&value)?,
        };

        // Fetch first so that fields not given on the command line keep
        // their current values.
        let current = match self.api.get_object(&self.resource_name, &id).await {
            Ok(current) => current,
            Err(e) => return Err(self.handle_error(action, &changes, e)),
        };

        let payload = merge_update_payload(current, &changes);
        let body = Value::Object(payload.clone());
        debug!(
            "{} {} {} with payload {}",
            action.verb(),
            self.resource_name,
            id,
            body
        );

        match self.api.put_object(&self.resource_name, &id, &payload).await {
            Ok(_) => self.handle_response(action, &changes),
            Err(e) => Err(self.handle_error(action, &changes, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn remote(value: Value) -> RemoteObject {
        RemoteObject::try_from(value).unwrap()
    }

    #[test]
    fn test_merge_keeps_unspecified_fields() {
        let current = remote(json!({"id": 1, "name": "a", "description": "x"}));
        let changes = ParamSet::new().with("description", "y");

        let payload = merge_update_payload(current, &changes);

        assert_eq!(Value::Object(payload), json!({"name": "a", "description": "y"}));
    }

    #[test]
    fn test_merge_ignores_null_changes() {
        let current = remote(json!({"id": 1, "name": "a", "description": "x"}));
        let changes = ParamSet::new()
            .with("name", Value::Null)
            .with("description", "y");

        let payload = merge_update_payload(current, &changes);

        assert_eq!(payload.get("name"), Some(&json!("a")));
        assert_eq!(payload.get("description"), Some(&json!("y")));
    }

    #[test]
    fn test_merge_never_carries_identifier() {
        let current = remote(json!({"id": 1, "name": "a"}));
        let changes = ParamSet::new().with("id", 9).with("name", "b");

        let payload = merge_update_payload(current, &changes);

        assert!(!payload.contains_key(ID_FIELD));
        assert_eq!(payload.get("name"), Some(&json!("b")));
    }

    #[test]
    fn test_merge_adds_new_fields() {
        let current = remote(json!({"id": 1, "hostname": "dev1"}));
        let changes = ParamSet::new().with("attributes", json!({"owner": "neteng"}));

        let payload = merge_update_payload(current, &changes);

        assert_eq!(
            Value::Object(payload),
            json!({"hostname": "dev1", "attributes": {"owner": "neteng"}})
        );
    }

    #[test]
    fn test_rejected_message_format() {
        let error = ControllerError::Rejected {
            status: 409,
            reason: "Conflict".to_string(),
            action: Action::Create,
            singular: "device".to_string(),
            args: "hostname=\"dev1\"".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "[FATAL] 409 Conflict trying to add device with args: hostname=\"dev1\""
        );
    }
}
