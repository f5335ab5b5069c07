// src/table/serialize.rs

use std::io::{Read, Write};

use csv::{ReaderBuilder, Terminator, WriterBuilder};

use super::{RawTable, Table};

/// Header row, then one record per data row. Minimal quoting, `\n` endings.
pub fn write_csv<W: Write>(table: &Table, out: W) -> csv::Result<()> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);

    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read back what [`write_csv`] produced.
pub fn read_csv<R: Read>(input: R) -> csv::Result<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(Table::from_raw(RawTable::new(rows)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::normalize_identity;
    use anyhow::Result;

    fn sample() -> Table {
        Table::from_raw(RawTable::new(vec![
            vec!["Match ID".into(), "Map".into(), "Result".into()],
            vec!["101".into(), "Hardpoint".into(), "Win".into()],
            vec!["102".into(), "Domination".into(), "Loss".into()],
        ]))
    }

    #[test]
    fn writes_header_and_rows() -> Result<()> {
        let mut table = sample();
        normalize_identity(&mut table, "Match ID")?;

        let mut buf = Vec::new();
        write_csv(&table, &mut buf)?;
        assert_eq!(
            String::from_utf8(buf)?,
            "Match ID,Map,Result\n'101,Hardpoint,Win\n'102,Domination,Loss\n"
        );
        Ok(())
    }

    #[test]
    fn awkward_cells_survive_a_round_trip() -> Result<()> {
        let table = Table::from_raw(RawTable::new(vec![
            vec!["Match ID".into(), "Notes, misc".into(), "Score".into()],
            vec!["'7".into(), "said \"gg\"".into(), "".into()],
            vec!["'8".into(), "two\nlines".into(), "75 - 60".into()],
        ]));

        let mut buf = Vec::new();
        write_csv(&table, &mut buf)?;
        let back = read_csv(buf.as_slice())?;

        assert_eq!(back, table);
        Ok(())
    }
}
