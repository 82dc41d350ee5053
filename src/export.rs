use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use crate::card::Card;
use crate::error::CardGenError;

pub const CSV_HEADER: [&str; 9] = [
    "expression",
    "context",
    "translation",
    "literal_translation",
    "example_sentence",
    "example_translation",
    "notes",
    "cefr_level",
    "audio_url",
];

/// Creates or truncates `path` and writes the header plus one row per card.
pub fn write_cards_csv(path: &Path, cards: &[Card]) -> Result<(), CardGenError> {
    let to_io_error = |source| CardGenError::Io {
        path: path.to_path_buf(),
        source,
    };

    let writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(to_io_error)?;
    write_rows(writer, cards).map_err(to_io_error)
}

fn write_rows<W: Write>(mut writer: csv::Writer<W>, cards: &[Card]) -> csv::Result<()> {
    writer.write_record(CSV_HEADER)?;
    for card in cards {
        writer.serialize(card)?;
    }
    writer.flush()?;
    Ok(())
}
