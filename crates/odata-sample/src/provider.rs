//! # People Action Provider
//!
//! Decides where `Sample.Celebrate` is advertised and runs the sample actions.
//! Resolution uses the default hooks, so the actions come from the metadata.

use odata_recipe::domain::{PrimitiveValue, ResourceInstance, Value};
use odata_recipe::error::ServiceError;
use odata_recipe::framework::{ActionProvider, OperationContext};
use odata_recipe::operations::{InvocationBinding, Invokable, ResolvedOperation};
use odata_recipe::serializer::OperationDescriptor;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct PeopleActionProvider;

impl ActionProvider for PeopleActionProvider {
    fn advertise_action(
        &self,
        _ctx: &OperationContext,
        operation: &ResolvedOperation,
        instance: &ResourceInstance,
        in_feed: bool,
        _descriptor: &mut Option<OperationDescriptor>,
    ) -> Result<bool, ServiceError> {
        let advertise = match operation.name() {
            "Celebrate" => age(instance).is_some(),
            _ => true,
        };
        debug!(action = operation.name(), in_feed, advertise, "Advertise decision");
        Ok(advertise)
    }

    fn create_invokable(
        &self,
        _ctx: &OperationContext,
        operation: &ResolvedOperation,
        binding: InvocationBinding,
        parameters: Vec<(String, Value)>,
    ) -> Result<Box<dyn Invokable>, ServiceError> {
        let command = match (operation.name(), binding) {
            ("Greet", InvocationBinding::Entity { instance, .. }) => Command::Greet(instance),
            ("Celebrate", InvocationBinding::Entity { instance, .. }) => Command::Celebrate(instance),
            ("Promote", InvocationBinding::Entity { instance, .. }) => {
                let title = parameters
                    .into_iter()
                    .find(|(name, _)| name == "Title")
                    .map(|(_, value)| value)
                    .unwrap_or(Value::Null);
                Command::Promote { instance, title }
            }
            ("CountAll", InvocationBinding::Collection(members)) => Command::CountAll(members.len()),
            (_, _) => {
                return Err(ServiceError::NotImplemented(format!(
                    "no invokable for action '{}'",
                    operation.full_name()
                )))
            }
        };
        Ok(Box::new(PeopleInvokable {
            action: operation.full_name(),
            command: Some(command),
            result: None,
            updated: None,
        }))
    }
}

fn age(instance: &ResourceInstance) -> Option<i32> {
    match instance.property("Age").and_then(Value::as_primitive) {
        Some(PrimitiveValue::Int32(age)) => Some(*age),
        _ => None,
    }
}

fn name(instance: &ResourceInstance) -> String {
    instance
        .property("Name")
        .and_then(Value::as_primitive)
        .map(PrimitiveValue::text)
        .unwrap_or_default()
}

enum Command {
    Greet(ResourceInstance),
    Celebrate(ResourceInstance),
    Promote { instance: ResourceInstance, title: Value },
    CountAll(usize),
}

struct PeopleInvokable {
    action: String,
    command: Option<Command>,
    result: Option<Value>,
    updated: Option<ResourceInstance>,
}

impl Invokable for PeopleInvokable {
    fn invoke(&mut self) -> Result<(), ServiceError> {
        let command = self.command.take().ok_or_else(|| ServiceError::Invocation {
            action: self.action.clone(),
            message: "already invoked".to_string(),
        })?;
        match command {
            Command::Greet(instance) => {
                self.result = Some(Value::from(format!("Hello, {}!", name(&instance))));
            }
            Command::Celebrate(mut instance) => {
                let next = age(&instance)
                    .and_then(|age| age.checked_add(1))
                    .ok_or_else(|| ServiceError::Invocation {
                        action: self.action.clone(),
                        message: "the person has no age to increase".to_string(),
                    })?;
                instance.set_property("Age", Value::from(next));
                self.result = Some(Value::from(next));
                self.updated = Some(instance);
            }
            Command::Promote { mut instance, title } => {
                instance.set_property("Title", title);
                self.updated = Some(instance);
            }
            Command::CountAll(count) => {
                let count = i32::try_from(count).unwrap_or(i32::MAX);
                self.result = Some(Value::from(count));
            }
        }
        Ok(())
    }

    fn result(&mut self) -> Result<Option<Value>, ServiceError> {
        Ok(self.result.take())
    }

    fn updated_binding(&mut self) -> Option<ResourceInstance> {
        self.updated.take()
    }
}
