//! Fixtures shared by the generator tests

use crate::config::{CodegenConfig, Preferences};
use crate::parser::{Column, ForeignKey, HasManyRelationship, PrimaryKey, Table};

pub fn column(name: &str, data_type: &str, nullable: bool) -> Column {
    Column {
        name: name.to_string(),
        data_type: data_type.to_string(),
        length: None,
        precision: None,
        scale: None,
        nullable,
        is_primary_key: false,
        is_foreign_key: false,
    }
}

pub fn table(name: &str, key: &[&str], columns: Vec<Column>) -> Table {
    Table {
        name: name.to_string(),
        columns,
        primary_key: PrimaryKey {
            columns: key.iter().map(|k| k.to_string()).collect(),
        },
        foreign_keys: Vec::new(),
        has_many: Vec::new(),
    }
}

/// `Shop` namespace, C#, SQL Server, auto properties, lazy
pub fn preferences() -> Preferences {
    CodegenConfig {
        namespace: "Shop".to_string(),
        ..Default::default()
    }
    .preferences()
    .unwrap()
}

/// Customer(CustomerId, Name) with an Orders collection
pub fn customer() -> Table {
    let mut name = column("Name", "nvarchar", false);
    name.length = Some(100);
    let mut customer = table(
        "Customer",
        &["CustomerId"],
        vec![column("CustomerId", "int", false), name],
    );
    customer.has_many.push(HasManyRelationship {
        reference: "Orders".to_string(),
        reference_column: "CustomerId".to_string(),
    });
    customer.resolve_key_flags();
    customer
}

/// Orders(OrderId, CustomerId -> Customer, Total)
pub fn orders() -> Table {
    let mut orders = table(
        "Orders",
        &["OrderId"],
        vec![
            column("OrderId", "int", false),
            column("CustomerId", "int", false),
            column("Total", "money", true),
        ],
    );
    orders.foreign_keys.push(ForeignKey {
        column_name: "CustomerId".to_string(),
        references: "Customer".to_string(),
        unique_property_name: "Customer".to_string(),
    });
    orders.resolve_key_flags();
    orders
}

/// OrderLine with a composite key (OrderId, LineNo)
pub fn order_line() -> Table {
    let mut line = table(
        "OrderLine",
        &["OrderId", "LineNo"],
        vec![
            column("OrderId", "int", false),
            column("LineNo", "smallint", false),
            column("Quantity", "int", false),
        ],
    );
    line.resolve_key_flags();
    line
}
