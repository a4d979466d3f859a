use fastrace::trace;
use recfile_types::Record;

/// Position of the first record whose id equals `id`.
#[trace]
pub fn find_by_id(id: &str, records: &[Record]) -> Option<usize> {
    records.iter().position(|record| record.id == id)
}

pub fn insert(records: &mut Vec<Record>, record: Record) {
    records.push(record);
}

/// Drops the record at `position`, shifting everything after it down by one.
/// An out-of-range position leaves the sequence untouched.
#[trace]
pub fn remove_at(records: Vec<Record>, position: usize) -> Vec<Record> {
    let mut records = records;
    if position < records.len() {
        records.remove(position);
    }
    records
}
