use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn to_json<T: Serialize>(obj: &T) -> String {
    // Only fails for maps with non-string keys, which callers don't serialize
    serde_json::to_string_pretty(obj).unwrap()
}

pub fn slurp_file<I: AsRef<str>>(path: I) -> Result<Vec<u8>> {
    let path = path.as_ref();
    Ok(fs_err::read(path)?)
}

pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T> {
    let bytes = slurp_file(path)?;
    let obj = serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path))?;
    Ok(obj)
}

pub fn write_json<T: Serialize>(path: &str, obj: &T) -> Result<()> {
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs_err::create_dir_all(parent)?;
        }
    }
    fs_err::write(path, to_json(obj))?;
    info!("Wrote {}", path);
    Ok(())
}

/// Reads a headerless CSV file. Every row must have exactly `columns` cells; cells are trimmed.
pub fn read_csv_rows(path: &str, columns: usize) -> Result<Vec<Vec<String>>> {
    let file = fs_err::File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(file);
    let mut rows = Vec::new();
    for (idx, rec) in reader.records().enumerate() {
        let rec = rec.with_context(|| format!("{} row {}", path, idx + 1))?;
        if rec.len() != columns {
            bail!(
                "{} row {} has {} columns, expected {}",
                path,
                idx + 1,
                rec.len(),
                columns
            );
        }
        rows.push(rec.iter().map(|x| x.to_string()).collect());
    }
    Ok(rows)
}
