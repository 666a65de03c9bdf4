//! Numbered-menu loop driving a [`Table`].

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::Result;
use employeedb::{Record, Table};
use tracing::{debug, error};

use super::command::{parse_number, parse_text, MenuOption};
use super::config::Config;

const RULE: &str = "--------------------------------------------------";

enum Flow {
    Continue,
    Exit,
}

pub struct Repl<R, W> {
    input: R,
    output: W,
    table: Table,
    config: Config,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(table: Table, config: Config, input: R, output: W) -> Self {
        Self {
            input,
            output,
            table,
            config,
        }
    }

    /// Consume the REPL, handing back the table in its final state.
    #[cfg(test)]
    pub fn into_table(self) -> Table {
        self.table
    }

    /// Run until the exit option is chosen or the input ends.
    pub fn run(&mut self) -> Result<()> {
        if !self.config.quiet {
            writeln!(
                self.output,
                "Employee DB started with {} record(s)",
                self.table.count()
            )?;
        }

        loop {
            if !self.config.quiet {
                self.print_menu()?;
            }

            let Some(line) = self.prompt("Enter option: ")? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let option = match line.parse::<MenuOption>() {
                Ok(option) => option,
                Err(err) => {
                    writeln!(self.output, "Invalid option: {err}. Try again.")?;
                    continue;
                }
            };

            debug!(?option, "menu option selected");
            match self.execute(option)? {
                Flow::Continue => {}
                Flow::Exit => break,
            }
        }

        writeln!(self.output, "Thank you for using Employee DB!")?;
        self.output.flush()?;
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\n------------------ Employee DB -------------------")?;
        for option in MenuOption::ALL {
            writeln!(self.output, "{option}")?;
        }
        writeln!(self.output, "{RULE}")?;
        Ok(())
    }

    /// Print `message`, then read one line. `None` once the input is exhausted.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        if !self.config.quiet {
            write!(self.output, "{message}")?;
            self.output.flush()?;
        }

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(parse_text(&line)))
    }

    /// Read a number. An unparsable answer is reported and yields `None`, the
    /// same as end of input.
    fn prompt_number<T: FromStr>(&mut self, message: &str) -> Result<Option<T>> {
        let Some(line) = self.prompt(message)? else {
            return Ok(None);
        };

        match parse_number(&line) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                writeln!(self.output, "{err}")?;
                Ok(None)
            }
        }
    }

    fn print_records(&mut self, records: &[Record], empty_message: &str) -> Result<()> {
        if records.is_empty() {
            writeln!(self.output, "{empty_message}")?;
        }
        for record in records {
            writeln!(self.output, "{record}")?;
        }
        Ok(())
    }

    fn print_table(&mut self) -> Result<()> {
        writeln!(self.output, "\n{RULE}")?;
        writeln!(self.output, "Data from Employee table")?;
        writeln!(self.output, "{RULE}")?;
        let records = self.table.select_all();
        for record in &records {
            writeln!(self.output, "{record}")?;
        }
        writeln!(self.output, "{RULE}\n")?;
        Ok(())
    }

    fn execute(&mut self, option: MenuOption) -> Result<Flow> {
        match option {
            MenuOption::Insert => {
                let Some(name) = self.prompt("Enter name: ")? else {
                    return Ok(Flow::Continue);
                };
                let Some(age) = self.prompt_number::<i32>("Enter age: ")? else {
                    return Ok(Flow::Continue);
                };
                let Some(address) = self.prompt("Enter address: ")? else {
                    return Ok(Flow::Continue);
                };
                let Some(salary) = self.prompt_number::<i64>("Enter salary: ")? else {
                    return Ok(Flow::Continue);
                };

                let record = self.table.insert(name, age, address, salary);
                writeln!(self.output, "New record inserted with ID {}.", record.id())?;
            }
            MenuOption::SelectAll => self.print_table()?,
            MenuOption::Backup => {
                let path = self.config.snapshot_path.clone();
                match self.table.snapshot(&path) {
                    Ok(()) => writeln!(
                        self.output,
                        "Database backup stored in {}.",
                        path.display()
                    )?,
                    Err(err) => {
                        error!(error = %err, "backup failed");
                        writeln!(self.output, "Backup failed: {err}")?;
                    }
                }
            }
            MenuOption::SelectById => {
                let Some(id) = self.prompt_number::<u64>("Enter ID: ")? else {
                    return Ok(Flow::Continue);
                };
                match self.table.select_by_id(id) {
                    Some(record) => writeln!(self.output, "{record}")?,
                    None => writeln!(self.output, "No record found with ID = {id}")?,
                }
            }
            MenuOption::SelectByName => {
                let Some(name) = self.prompt("Enter name: ")? else {
                    return Ok(Flow::Continue);
                };
                let records = self.table.select_by_name(&name);
                self.print_records(&records, &format!("No record found with Name = {name}"))?;
            }
            MenuOption::DeleteById => {
                let Some(id) = self.prompt_number::<u64>("Enter ID: ")? else {
                    return Ok(Flow::Continue);
                };
                if self.table.delete_by_id(id) {
                    writeln!(self.output, "Record deleted successfully.")?;
                } else {
                    writeln!(self.output, "No record found with ID = {id}")?;
                }
            }
            MenuOption::UpdateSalary => {
                let Some(id) = self.prompt_number::<u64>("Enter ID: ")? else {
                    return Ok(Flow::Continue);
                };
                let Some(salary) = self.prompt_number::<i64>("Enter new salary: ")? else {
                    return Ok(Flow::Continue);
                };
                if self.table.update_salary_by_id(id, salary) {
                    writeln!(self.output, "Salary updated for ID {id}")?;
                } else {
                    writeln!(self.output, "No record found with ID = {id}")?;
                }
            }
            MenuOption::SortBySalary => {
                self.table.sort_by_salary();
                writeln!(self.output, "Employees sorted by salary.")?;
                self.print_table()?;
            }
            MenuOption::MaxSalary => {
                writeln!(self.output, "Highest salary: {}", self.table.max_salary())?
            }
            MenuOption::MinSalary => {
                writeln!(self.output, "Lowest salary: {}", self.table.min_salary())?
            }
            MenuOption::AverageSalary => {
                writeln!(self.output, "Average salary: {:?}", self.table.average_salary())?
            }
            MenuOption::Count => {
                writeln!(self.output, "Total employees: {}", self.table.count())?
            }
            MenuOption::SelectByAgeRange => {
                let Some(min_age) = self.prompt_number::<i32>("Enter min age: ")? else {
                    return Ok(Flow::Continue);
                };
                let Some(max_age) = self.prompt_number::<i32>("Enter max age: ")? else {
                    return Ok(Flow::Continue);
                };
                let records = self.table.select_by_age_range(min_age, max_age);
                self.print_records(&records, "No employees found in given age range.")?;
            }
            MenuOption::ExportCsv => {
                let Some(file) = self.prompt("Enter filename (e.g., data.csv): ")? else {
                    return Ok(Flow::Continue);
                };
                match self.table.export_csv(&file) {
                    Ok(()) => writeln!(self.output, "Data exported successfully to {file}")?,
                    Err(err) => {
                        error!(error = %err, file = %file, "csv export failed");
                        writeln!(self.output, "Error exporting data: {err}")?;
                    }
                }
            }
            MenuOption::Exit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_script(table: Table, config: Config, script: &str) -> (Table, String) {
        let mut output = Vec::new();
        let mut repl = Repl::new(table, config, script.as_bytes(), &mut output);
        repl.run().unwrap();
        let table = repl.into_table();
        (table, String::from_utf8(output).unwrap())
    }

    fn quiet() -> Config {
        Config {
            quiet: true,
            ..Config::default()
        }
    }

    #[test]
    fn insert_and_query_session() {
        let script = "1\nAlice\n30\nX\n1000\n\
                      1\nBob\n25\nY\n2000\n\
                      4\n2\n\
                      13\n25\n30\n\
                      11\n\
                      12\n\
                      20\n";
        let (table, out) = run_script(Table::new(), quiet(), script);

        assert_eq!(table.count(), 2);
        assert!(out.contains("New record inserted with ID 1."));
        assert!(out.contains("ID : 2 | Name : Bob | Age : 25 | Address : Y | Salary : 2000"));
        assert!(out.contains("Average salary: 1500.0\n"));
        assert!(out.contains("Total employees: 2"));
        assert!(out.ends_with("Thank you for using Employee DB!\n"));
    }

    #[test]
    fn update_delete_and_sort_session() {
        let mut table = Table::new();
        table.insert("Alice", 30, "X", 3000);
        table.insert("Bob", 25, "Y", 2000);
        table.insert("Carol", 41, "Z", 5000);

        let script = "7\n3\n1000\n6\n2\n6\n2\n8\n9\n20\n";
        let (table, out) = run_script(table, quiet(), script);

        assert!(out.contains("Salary updated for ID 3"));
        assert!(out.contains("Record deleted successfully."));
        assert!(out.contains("No record found with ID = 2"));
        assert!(out.contains("Highest salary: 3000"));

        let ids: Vec<u64> = table.iter().map(Record::id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn invalid_input_returns_to_menu() {
        let script = "99\nabc\n1\nDave\nthirty\n12\n20\n";
        let (table, out) = run_script(Table::new(), quiet(), script);

        assert!(out.contains("Invalid option: unknown option 99. Try again."));
        assert!(out.contains("Invalid option: 'abc' is not a valid number. Try again."));
        assert!(out.contains("'thirty' is not a valid number"));
        assert!(out.contains("Total employees: 0"));
        assert_eq!(table.count(), 0);
    }

    #[test]
    fn end_of_input_exits() {
        let (_, out) = run_script(Table::new(), quiet(), "5\n");
        assert!(out.ends_with("Thank you for using Employee DB!\n"));
    }

    #[test]
    fn select_by_name_reports_missing() {
        let (_, out) = run_script(Table::new(), quiet(), "5\nNobody\n20\n");
        assert!(out.contains("No record found with Name = Nobody"));
    }

    #[test]
    fn backup_and_export_write_files() {
        let tmp = tempfile::tempdir().unwrap();
        let snapshot = tmp.path().join("staff.snapshot");
        let csv = tmp.path().join("staff.csv");
        let config = Config {
            snapshot_path: snapshot.clone(),
            ..quiet()
        };

        let script = format!("1\nAlice\n30\nX\n1000\n3\n14\n{}\n20\n", csv.display());
        let (table, out) = run_script(Table::new(), config, &script);

        assert!(out.contains("Database backup stored in"));
        assert!(out.contains("Data exported successfully to"));
        assert_eq!(Table::restore(&snapshot).unwrap(), table);
        assert_eq!(
            std::fs::read_to_string(&csv).unwrap(),
            "ID,Name,Age,Address,Salary\n1,Alice,30,X,1000\n"
        );
    }

    #[test]
    fn menu_is_printed_unless_quiet() {
        let (_, out) = run_script(Table::new(), Config::default(), "20\n");
        assert!(out.contains("Employee DB started with 0 record(s)"));
        assert!(out.contains("14 : Export data to CSV"));
        assert!(out.contains("Enter option: "));
    }
}
