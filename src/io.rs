use std::io::{BufRead, Write};

use anyhow::Result;

use crate::table::{Table, Value};

pub struct CsvData {
    pub header: Vec<String>,
    pub table: Table,
}

pub fn read_csv(filename: &str, delimiter: char) -> Result<CsvData> {
    let mut rows: Vec<Vec<Value>> = vec![];
    let mut header = vec![];

    let file = std::fs::File::open(filename)?;
    let reader = std::io::BufReader::new(file);

    for line in reader.lines() {
        let line = line?;
        if header.is_empty() {
            header = line
                .split(delimiter)
                .map(|value| value.to_string())
                .collect();
            continue;
        }
        let values = line
            .split(delimiter)
            .map(|cell| match cell.parse::<f64>() {
                Ok(number) => Value::Number(number),
                Err(_) => Value::Text(cell.to_string()),
            })
            .collect();
        rows.push(values);
    }
    Ok(CsvData {
        header,
        table: Table::new(rows)?,
    })
}

pub fn write_csv(filename: &str, data: &CsvData, delimiter: char) -> Result<()> {
    let mut file = std::fs::File::create(filename)?;
    let header_line = data.header.join(&delimiter.to_string());
    file.write_all(header_line.as_bytes())?;
    file.write_all("\n".as_bytes())?;
    for row in 0..data.table.n_rows() {
        let values = data
            .table
            .row(row)
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<String>>();
        let line = values.join(&delimiter.to_string());
        file.write_all(line.as_bytes())?;
        file.write_all("\n".as_bytes())?;
    }
    Ok(())
}
