//! # People Model
//!
//! ```text
//! Person (ID, Name, Age, Tags, Addresses, BestFriend, Friends)
//!   └── ImportantPerson (+ Title)
//!         └── VeryImportantPerson (+ Office)
//! ```
//!
//! All three live in the `People` set. Actions:
//!
//! | Action | Bound to | Kind | Returns |
//! |--------|----------|------|---------|
//! | `Sample.Greet` | `Person` | Always | `Edm.String` |
//! | `Sample.Celebrate` | `Person` | Sometimes (needs an `Age`) | `Edm.Int32` |
//! | `Sample.Promote(Title)` | `ImportantPerson` | Always | nothing |
//! | `Sample.CountAll` | `Collection(Person)` | Always | `Edm.Int32` |

use std::sync::Arc;

use odata_recipe::domain::{CollectionValue, ComplexValue, ResourceInstance, Value};
use odata_recipe::model::{BindingKind, Metadata, MetadataBuilder, ModelError, PrimitiveKind, ServiceAction, SetId, TypeId};

pub const NAMESPACE: &str = "Sample";

/// The frozen metadata plus the ids the sample refers to.
#[derive(Clone)]
pub struct PeopleModel {
    pub metadata: Arc<Metadata>,
    pub address: TypeId,
    pub person: TypeId,
    pub important_person: TypeId,
    pub very_important_person: TypeId,
    pub people: SetId,
}

pub fn build_model() -> Result<PeopleModel, ModelError> {
    let mut builder = MetadataBuilder::new(NAMESPACE);
    let string = builder.primitive(PrimitiveKind::String);
    let int32 = builder.primitive(PrimitiveKind::Int32);

    let address = builder.add_complex_type("Address", None)?;
    builder.add_property(address, "Street", string)?;
    builder.add_property(address, "City", string)?;

    let person = builder.add_entity_type("Person", None)?;
    builder.add_key_property(person, "ID", PrimitiveKind::Int32)?;
    builder.add_property(person, "Name", string)?;
    builder.set_nullable(person, "Name", false)?;
    builder.add_property(person, "Age", int32)?;
    let tags = builder.collection_of(string)?;
    builder.add_property(person, "Tags", tags)?;
    let addresses = builder.collection_of(address)?;
    builder.add_property(person, "Addresses", addresses)?;
    builder.add_navigation_property(person, "BestFriend", person, false)?;
    builder.add_navigation_property(person, "Friends", person, true)?;

    let important_person = builder.add_entity_type("ImportantPerson", Some(person))?;
    builder.add_property(important_person, "Title", string)?;

    let very_important_person = builder.add_entity_type("VeryImportantPerson", Some(important_person))?;
    builder.add_property(very_important_person, "Office", string)?;

    let people = builder.add_resource_set("People", person)?;
    let all_people = builder.entity_collection_of(person)?;

    builder.add_action(
        ServiceAction::new(NAMESPACE, "Greet")
            .bound_to("person", person, BindingKind::Always)
            .returning(string),
    )?;
    builder.add_action(
        ServiceAction::new(NAMESPACE, "Celebrate")
            .bound_to("person", person, BindingKind::Sometimes)
            .returning(int32),
    )?;
    builder.add_action(
        ServiceAction::new(NAMESPACE, "Promote")
            .bound_to("person", important_person, BindingKind::Always)
            .with_parameter("Title", string),
    )?;
    builder.add_action(
        ServiceAction::new(NAMESPACE, "CountAll")
            .bound_to("people", all_people, BindingKind::Always)
            .returning(int32),
    )?;

    Ok(PeopleModel {
        metadata: builder.freeze()?,
        address,
        person,
        important_person,
        very_important_person,
        people,
    })
}

impl PeopleModel {
    /// A person without a key; the store assigns one.
    pub fn person(&self, name: &str, age: Option<i32>) -> ResourceInstance {
        let mut instance = ResourceInstance::new(self.person).with_property("Name", name);
        if let Some(age) = age {
            instance.set_property("Age", Value::from(age));
        }
        instance
    }

    pub fn important_person(&self, name: &str, title: &str) -> ResourceInstance {
        ResourceInstance::new(self.important_person)
            .with_property("Name", name)
            .with_property("Title", title)
    }

    pub fn very_important_person(&self, name: &str, title: &str, office: &str) -> ResourceInstance {
        ResourceInstance::new(self.very_important_person)
            .with_property("Name", name)
            .with_property("Title", title)
            .with_property("Office", office)
    }

    pub fn address(&self, street: &str, city: &str) -> Value {
        ComplexValue::new(self.address)
            .with("Street", Value::from(street))
            .with("City", Value::from(city))
            .into()
    }

    /// Tags backed by a one-shot stream, the way a lazily loaded list arrives.
    pub fn streamed_tags(&self, tags: &[&str]) -> Value {
        CollectionValue::from_stream(tags.iter().map(|t| Value::from(*t)).collect::<Vec<_>>()).into()
    }
}
