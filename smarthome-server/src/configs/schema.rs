use crate::models::{ItemTable, Table};

pub struct SchemaManager {
    tables: Vec<Box<dyn Table + Send + Sync>>,
}

impl SchemaManager {
    pub fn new(mut tables: Vec<Box<dyn Table + Send + Sync>>) -> Self {
        Self::sort_tables(&mut tables);
        Self { tables }
    }

    /// Orders tables so every table follows the tables it depends on.
    fn sort_tables(tables: &mut Vec<Box<dyn Table + Send + Sync>>) {
        let mut pending = std::mem::take(tables);
        let mut sorted: Vec<Box<dyn Table + Send + Sync>> = Vec::with_capacity(pending.len());

        while !pending.is_empty() {
            let ready = pending.iter().position(|table| {
                table
                    .dependencies()
                    .iter()
                    .all(|dep| sorted.iter().any(|done| done.name() == *dep))
            });

            let Some(index) = ready else {
                panic!("Circular dependency detected or unresolved dependencies exist.");
            };
            sorted.push(pending.remove(index));
        }

        *tables = sorted;
    }

    pub fn create_schema(&self) -> Vec<String> {
        self.tables.iter().map(|table| table.create()).collect()
    }

    pub fn dispose_schema(&self) -> Vec<String> {
        self.tables.iter().rev().map(|table| table.dispose()).collect()
    }
}

impl Default for SchemaManager {
    fn default() -> Self {
        SchemaManager::new(vec![Box::new(ItemTable)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockTable {
        name: &'static str,
        dependencies: Vec<&'static str>,
    }

    impl Table for MockTable {
        fn name(&self) -> &'static str {
            self.name
        }

        fn create(&self) -> String {
            format!("CREATE TABLE {};", self.name)
        }

        fn dispose(&self) -> String {
            format!("DROP TABLE {};", self.name)
        }

        fn dependencies(&self) -> Vec<&'static str> {
            self.dependencies.clone()
        }
    }

    fn table(name: &'static str, dependencies: Vec<&'static str>) -> Box<dyn Table + Send + Sync> {
        Box::new(MockTable { name, dependencies })
    }

    #[test]
    fn test_correct_creation_order() {
        let manager = SchemaManager::new(vec![
            table("item_index", vec!["items", "tables"]),
            table("items", vec!["tables"]),
            table("tables", vec![]),
        ]);

        let statements = manager.create_schema();

        assert_eq!(statements[0], "CREATE TABLE tables;");
        assert_eq!(statements[1], "CREATE TABLE items;");
        assert_eq!(statements[2], "CREATE TABLE item_index;");
    }

    #[test]
    fn test_dispose_in_reverse_order() {
        let manager = SchemaManager::new(vec![
            table("items", vec!["tables"]),
            table("tables", vec![]),
        ]);

        let statements = manager.dispose_schema();

        assert_eq!(statements, vec!["DROP TABLE items;", "DROP TABLE tables;"]);
    }

    #[test]
    #[should_panic(expected = "Circular dependency")]
    fn test_circular_dependency_panics() {
        SchemaManager::new(vec![table("a", vec!["b"]), table("b", vec!["a"])]);
    }
}
