//! Read a range of lines of a csv file, indexing it on the way

use indexed_lines::File;

fn main() -> indexed_lines::Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "<some csv file>".to_string());

    // Open the file. Nothing gets read yet
    let mut file = File::open(path)?;

    // Scans and indexes the first 30 lines
    let head = file.get_records(0, 30)?;
    println!("{} lines read", head.len());

    // Served from the index, no scanning required
    if let Some(line) = file.read_line(10)? {
        println!("line 10: {}", line);
    }

    if file.is_end_of_stream() {
        println!("the file has no more lines");
    }

    file.close();
    Ok(())
}
