use std::fmt;

use super::{Client, Phone};

/// Every row of both tables, as returned by `Database::dump_all`
#[derive(Debug, Default)]
pub struct TableDump {
    pub clients: Vec<Client>,
    pub phones: Vec<Phone>,
}

impl fmt::Display for TableDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "client ({} rows)", self.clients.len())?;
        for client in &self.clients {
            writeln!(
                f,
                "  {} | {} | {} | {}",
                client.id, client.first_name, client.last_name, client.email
            )?;
        }

        writeln!(f, "phone ({} rows)", self.phones.len())?;
        for phone in &self.phones {
            writeln!(f, "  {} | {} | {}", phone.id, phone.phone_number, phone.client_id)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_dump_lists_both_tables() {
        let dump = TableDump::default();
        assert_eq!(dump.to_string(), "client (0 rows)\nphone (0 rows)\n");
    }

    #[test]
    fn rows_are_rendered_one_per_line() {
        let dump = TableDump {
            clients: vec![Client {
                id: 1,
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                email: "jane@x.com".to_string(),
            }],
            phones: vec![
                Phone { id: 1, phone_number: 555000111, client_id: 1 },
                Phone { id: 2, phone_number: 79001233322, client_id: 1 },
            ],
        };

        let rendered = dump.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec![
                "client (1 rows)",
                "  1 | Jane | Doe | jane@x.com",
                "phone (2 rows)",
                "  1 | 555000111 | 1",
                "  2 | 79001233322 | 1",
            ]
        );
    }
}
