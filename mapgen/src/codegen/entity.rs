//! The member set of a domain class, derived once per table
//!
//! Every code-shaped strategy starts from the same [`EntityShape`]: key
//! columns, one reference per resolved foreign key, the remaining columns and
//! one collection per has-many relationship, in that order.

use super::naming::{format_plural, format_singular, format_text};
use super::type_mapper::{ClrType, DataTypeMapper, TypeRef};
use crate::config::Preferences;
use crate::error::Result;
use crate::parser::{Column, ForeignKey, HasManyRelationship, Table};

#[derive(Debug, Clone, PartialEq)]
pub enum MemberKind {
    /// Primary-key column
    Key,
    /// Many-to-one reference to another generated class
    Reference { class_name: String },
    /// Plain column value
    Value,
    /// One-to-many collection of another generated class
    Collection { element: String, concrete: TypeRef },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityMember {
    pub name: String,
    pub ty: TypeRef,
    /// Mapped column; for collections the child's foreign-key column
    pub column: String,
    /// Column type for keys and values
    pub clr_type: Option<ClrType>,
    pub nullable: bool,
    pub length: Option<u32>,
    /// Value column that also backs a foreign key
    pub is_foreign_key: bool,
    pub kind: MemberKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityShape {
    pub class_name: String,
    pub table_name: String,
    pub members: Vec<EntityMember>,
}

impl EntityShape {
    /// Build the member set for a table
    pub fn build(table: &Table, prefs: &Preferences) -> Result<Self> {
        let mut members = Vec::new();

        for column in table.primary_key_columns() {
            let ty = DataTypeMapper::map_column(prefs.dialect, &table.name, column)?;
            members.push(EntityMember {
                name: format_text(&column.name),
                ty: TypeRef::Clr(ty),
                column: column.name.clone(),
                clr_type: Some(ty),
                nullable: false,
                length: column.length,
                is_foreign_key: column.is_foreign_key,
                kind: MemberKind::Key,
            });
        }

        // A key to the owning table itself yields a member named like the class.
        for fk in table.resolved_foreign_keys() {
            members.push(reference_member(fk, prefs));
        }

        for column in table.non_key_columns() {
            if column.is_foreign_key && !prefs.include_foreign_keys {
                continue;
            }
            members.push(value_member(table, column, prefs)?);
        }

        for has_many in &table.has_many {
            // Several keys from one child table name their collections after the key column
            let ambiguous = table
                .has_many
                .iter()
                .filter(|other| other.reference.eq_ignore_ascii_case(&has_many.reference))
                .count()
                > 1;
            members.push(collection_member(table, has_many, ambiguous, prefs));
        }

        Ok(Self {
            class_name: prefs.class_name(&table.name),
            table_name: table.name.clone(),
            members,
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &EntityMember> {
        self.members.iter().filter(|m| m.kind == MemberKind::Key)
    }

    pub fn references(&self) -> impl Iterator<Item = &EntityMember> {
        self.members
            .iter()
            .filter(|m| matches!(m.kind, MemberKind::Reference { .. }))
    }

    pub fn values(&self) -> impl Iterator<Item = &EntityMember> {
        self.members.iter().filter(|m| m.kind == MemberKind::Value)
    }

    pub fn collections(&self) -> impl Iterator<Item = &EntityMember> {
        self.members
            .iter()
            .filter(|m| matches!(m.kind, MemberKind::Collection { .. }))
    }

    pub fn has_composite_key(&self) -> bool {
        self.keys().count() > 1
    }
}

fn reference_member(fk: &ForeignKey, prefs: &Preferences) -> EntityMember {
    let class_name = prefs.class_name(&fk.references);
    EntityMember {
        name: format_singular(fk.property_name()),
        ty: TypeRef::named(class_name.clone()),
        column: fk.column_name.clone(),
        clr_type: None,
        nullable: true,
        length: None,
        is_foreign_key: true,
        kind: MemberKind::Reference { class_name },
    }
}

fn value_member(table: &Table, column: &Column, prefs: &Preferences) -> Result<EntityMember> {
    let ty = DataTypeMapper::map_column(prefs.dialect, &table.name, column)?;
    Ok(EntityMember {
        name: format_text(&column.name),
        ty: TypeRef::for_column(ty, column.nullable),
        column: column.name.clone(),
        clr_type: Some(ty),
        nullable: column.nullable,
        length: column.length,
        is_foreign_key: column.is_foreign_key,
        kind: MemberKind::Value,
    })
}

fn collection_member(
    table: &Table,
    has_many: &HasManyRelationship,
    ambiguous: bool,
    prefs: &Preferences,
) -> EntityMember {
    let element = prefs.class_name(&has_many.reference);
    let key_column = if has_many.reference_column.is_empty() {
        table
            .primary_key
            .columns
            .first()
            .cloned()
            .unwrap_or_default()
    } else {
        has_many.reference_column.clone()
    };
    let name = if ambiguous {
        format!(
            "{}{}",
            format_text(strip_id_suffix(&key_column)),
            format_plural(&has_many.reference)
        )
    } else {
        format_plural(&has_many.reference)
    };
    EntityMember {
        name,
        ty: TypeRef::generic(prefs.collection_type.clone(), TypeRef::named(element.clone())),
        column: key_column,
        clr_type: None,
        nullable: true,
        length: None,
        is_foreign_key: false,
        kind: MemberKind::Collection {
            concrete: TypeRef::generic(
                concrete_collection_type(&prefs.collection_type),
                TypeRef::named(element.clone()),
            ),
            element,
        },
    }
}

/// `BillingAddressId` -> `BillingAddress`, `billing_address_id` -> `billing_address`
fn strip_id_suffix(column: &str) -> &str {
    let lower = column.to_ascii_lowercase();
    for suffix in ["_id", "id"] {
        if lower.ends_with(suffix) && column.len() > suffix.len() {
            return &column[..column.len() - suffix.len()];
        }
    }
    column
}

/// Instantiable type for a collection interface.
///
/// `IList`, `ICollection` and `IEnumerable` become `List`, `ISet` becomes
/// `HashSet` (`HashedSet` in Iesi.Collections); anything else is taken to be
/// concrete already. A namespace prefix is kept.
pub fn concrete_collection_type(collection_type: &str) -> String {
    let (namespace, name) = match collection_type.rsplit_once('.') {
        Some((ns, name)) => (Some(ns), name),
        None => (None, collection_type),
    };
    let concrete = match name {
        "IList" | "ICollection" | "IEnumerable" => "List",
        "ISet" if namespace.is_some_and(|ns| ns.contains("Iesi")) => "HashedSet",
        "ISet" => "HashSet",
        other => other,
    };
    match namespace {
        Some(ns) => format!("{}.{}", ns, concrete),
        None => concrete.to_string(),
    }
}

/// Whether the collection type has set semantics (mapped as `<set>`)
pub fn is_set_collection(collection_type: &str) -> bool {
    let name = collection_type.rsplit('.').next().unwrap_or(collection_type);
    name.ends_with("Set")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::test_support::{column, preferences, table};
    use crate::parser::PrimaryKey;

    #[test]
    fn test_concrete_collection_type() {
        assert_eq!(concrete_collection_type("IList"), "List");
        assert_eq!(concrete_collection_type("ICollection"), "List");
        assert_eq!(concrete_collection_type("IEnumerable"), "List");
        assert_eq!(concrete_collection_type("ISet"), "HashSet");
        assert_eq!(
            concrete_collection_type("Iesi.Collections.Generic.ISet"),
            "Iesi.Collections.Generic.HashedSet"
        );
        assert_eq!(
            concrete_collection_type("System.Collections.Generic.IList"),
            "System.Collections.Generic.List"
        );
        assert_eq!(concrete_collection_type("ObservableCollection"), "ObservableCollection");
    }

    #[test]
    fn test_set_semantics() {
        assert!(is_set_collection("ISet"));
        assert!(is_set_collection("Iesi.Collections.Generic.ISet"));
        assert!(!is_set_collection("IList"));
    }

    #[test]
    fn test_member_order() {
        let mut order = table(
            "Orders",
            &["OrderId"],
            vec![
                column("OrderId", "int", false),
                column("CustomerId", "int", false),
                column("Total", "decimal", true),
            ],
        );
        order.foreign_keys.push(ForeignKey {
            column_name: "CustomerId".into(),
            references: "Customer".into(),
            unique_property_name: "Customer".into(),
        });
        order.has_many.push(HasManyRelationship {
            reference: "OrderLine".into(),
            reference_column: "OrderId".into(),
        });
        order.resolve_key_flags();

        let shape = EntityShape::build(&order, &preferences()).unwrap();
        assert_eq!(shape.class_name, "Order");
        let names: Vec<&str> = shape.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["OrderId", "Customer", "Total", "OrderLines"]);
        assert_eq!(shape.values().next().unwrap().ty, TypeRef::Nullable(ClrType::Decimal));
    }

    #[test]
    fn test_include_foreign_keys() {
        let mut order = table(
            "Orders",
            &["OrderId"],
            vec![column("OrderId", "int", false), column("CustomerId", "int", false)],
        );
        order.foreign_keys.push(ForeignKey {
            column_name: "CustomerId".into(),
            references: "Customer".into(),
            unique_property_name: String::new(),
        });
        order.resolve_key_flags();

        let mut prefs = preferences();
        prefs.include_foreign_keys = true;
        let shape = EntityShape::build(&order, &prefs).unwrap();
        assert_eq!(shape.references().count(), 1);
        let value = shape.values().next().unwrap();
        assert_eq!(value.name, "CustomerId");
        assert!(value.is_foreign_key);
    }

    #[test]
    fn test_unresolved_foreign_key_yields_no_reference() {
        let mut order = table(
            "Orders",
            &["OrderId"],
            vec![column("OrderId", "int", false), column("WarehouseId", "int", true)],
        );
        order.foreign_keys.push(ForeignKey {
            column_name: "WarehouseId".into(),
            references: String::new(),
            unique_property_name: String::new(),
        });
        order.resolve_key_flags();

        let shape = EntityShape::build(&order, &preferences()).unwrap();
        assert_eq!(shape.references().count(), 0);
        assert_eq!(shape.members.len(), 1);
    }

    #[test]
    fn test_collection_key_column_falls_back_to_primary_key() {
        let mut customer = table("Customer", &["Id"], vec![column("Id", "int", false)]);
        customer.has_many.push(HasManyRelationship {
            reference: "Orders".into(),
            reference_column: String::new(),
        });
        let shape = EntityShape::build(&customer, &preferences()).unwrap();
        let orders = shape.collections().next().unwrap();
        assert_eq!(orders.column, "Id");
        assert_eq!(orders.ty, TypeRef::generic("IList", TypeRef::named("Order")));
    }

    #[test]
    fn test_collections_from_one_child_are_named_by_key() {
        let mut address = table("Address", &["AddressId"], vec![column("AddressId", "int", false)]);
        for key in ["BillingAddressId", "ShippingAddressId"] {
            address.has_many.push(HasManyRelationship {
                reference: "Orders".into(),
                reference_column: key.into(),
            });
        }
        address.has_many.push(HasManyRelationship {
            reference: "Resident".into(),
            reference_column: "AddressId".into(),
        });

        let shape = EntityShape::build(&address, &preferences()).unwrap();
        let names: Vec<&str> = shape.collections().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["BillingAddressOrders", "ShippingAddressOrders", "Residents"]);
    }

    #[test]
    fn test_unsupported_type_carries_column() {
        let shapes = Table {
            name: "Parcel".into(),
            columns: vec![column("Id", "int", false), column("Outline", "geography", true)],
            primary_key: PrimaryKey {
                columns: vec!["Id".into()],
            },
            foreign_keys: vec![],
            has_many: vec![],
        };
        let err = EntityShape::build(&shapes, &preferences()).unwrap_err();
        assert!(err.to_string().contains("column `Outline`"));
    }
}
