//! CSV датасета бронирований. Обязательные заголовки:
//! Booking_id,Total_bill,Checkin_month,Is_weekend,Room_type_Executive,Room_type_Standard,Room_type_Suite
//! Остальные колонки игнорируются.

use crate::{
    error::{HotelRevError, Result},
    model::{BookingRecord, Dataset, RoomType, RoomTypePolicy},
};
use csv::{ReaderBuilder, WriterBuilder};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use std::io::{BufRead, Write};
use std::str::FromStr;

pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Booking_id",
    "Total_bill",
    "Checkin_month",
    "Is_weekend",
    "Room_type_Executive",
    "Room_type_Standard",
    "Room_type_Suite",
];

#[derive(serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Booking_id")]
    booking_id: String,
    #[serde(rename = "Total_bill")]
    total_bill: String,
    #[serde(rename = "Checkin_month")]
    checkin_month: String,
    #[serde(rename = "Is_weekend")]
    is_weekend: String,
    #[serde(rename = "Room_type_Executive")]
    executive: String,
    #[serde(rename = "Room_type_Standard")]
    standard: String,
    #[serde(rename = "Room_type_Suite")]
    suite: String,
}

#[derive(serde::Serialize)]
struct CsvOutRow<'a> {
    #[serde(rename = "Booking_id")]
    booking_id: &'a str,
    #[serde(rename = "Total_bill")]
    total_bill: String,
    #[serde(rename = "Checkin_month")]
    checkin_month: u8,
    #[serde(rename = "Is_weekend")]
    is_weekend: u8,
    #[serde(rename = "Room_type_Executive")]
    executive: u8,
    #[serde(rename = "Room_type_Standard")]
    standard: u8,
    #[serde(rename = "Room_type_Suite")]
    suite: u8,
    #[serde(rename = "Room_type")]
    room_type: &'a str,
}

pub struct Csv;

impl Csv {
    /// Чтение с явной политикой разбора one-hot флагов категории.
    pub fn read_with_policy<R: BufRead>(r: R, policy: RoomTypePolicy) -> Result<Dataset> {
        let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(r);

        let headers = rdr
            .headers()
            .map_err(|e| HotelRevError::DataLoad(format!("cannot read header: {e}")))?
            .clone();
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| !headers.iter().any(|h| h == *c))
            .collect();
        if !missing.is_empty() {
            return Err(HotelRevError::DataLoad(format!(
                "missing required columns: {}",
                missing.join(", ")
            )));
        }

        let mut records = Vec::new();
        // строка 1 — заголовок
        for (i, rec) in rdr.deserialize::<CsvRow>().enumerate() {
            let line = i + 2;
            let row = rec.map_err(|e| HotelRevError::DataLoad(format!("line {line}: {e}")))?;
            records.push(parse_row(row, line, policy)?);
        }

        tracing::debug!(rows = records.len(), "parsed booking csv");
        Ok(Dataset::new(records))
    }
}

fn parse_row(row: CsvRow, line: usize, policy: RoomTypePolicy) -> Result<BookingRecord> {
    let total_bill = parse_amount(&row.total_bill)
        .ok_or_else(|| bad_cell(line, "Total_bill", &row.total_bill))?;
    if total_bill.is_sign_negative() && !total_bill.is_zero() {
        return Err(HotelRevError::DataLoad(format!(
            "line {line}: Total_bill must be non-negative, got {total_bill}"
        )));
    }

    let checkin_month = parse_int(&row.checkin_month)
        .filter(|m| (1..=12).contains(m))
        .map(|m| m as u8)
        .ok_or_else(|| bad_cell(line, "Checkin_month", &row.checkin_month))?;

    let is_weekend = flag_cell(line, "Is_weekend", &row.is_weekend)?;
    let executive = flag_cell(line, "Room_type_Executive", &row.executive)?;
    let standard = flag_cell(line, "Room_type_Standard", &row.standard)?;
    let suite = flag_cell(line, "Room_type_Suite", &row.suite)?;

    let flags = [executive, standard, suite];
    let room_type = RoomType::from_one_hot(flags, policy).ok_or_else(|| {
        HotelRevError::DataLoad(format!(
            "line {line}: booking {} must have exactly one room type flag set, got {:?}",
            row.booking_id, flags
        ))
    })?;
    if flags.iter().filter(|f| **f).count() > 1 {
        tracing::warn!(
            booking_id = %row.booking_id,
            line,
            resolved = %room_type,
            "several room type flags set, first one wins"
        );
    }

    Ok(BookingRecord {
        booking_id: row.booking_id,
        total_bill,
        checkin_month,
        is_weekend,
        room_type_executive: executive,
        room_type_standard: standard,
        room_type_suite: suite,
        room_type,
    })
}

fn bad_cell(line: usize, column: &str, value: &str) -> HotelRevError {
    HotelRevError::DataLoad(format!("line {line}: invalid {column} value '{value}'"))
}

fn flag_cell(line: usize, column: &str, value: &str) -> Result<bool> {
    parse_flag(value).ok_or_else(|| bad_cell(line, column, value))
}

fn parse_amount(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Целые приходят и как `7`, и как `7.0` (выгрузка из pandas).
fn parse_int(s: &str) -> Option<i64> {
    if let Ok(v) = s.parse::<i64>() {
        return Some(v);
    }
    let d = Decimal::from_str(s).ok()?;
    if d.fract().is_zero() {
        d.to_i64()
    } else {
        None
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        return Some(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Some(false);
    }
    match parse_int(s)? {
        0 => Some(false),
        1 => Some(true),
        _ => None,
    }
}

impl crate::traits::ReadFormat for Csv {
    fn read<R: BufRead>(r: R) -> Result<Dataset> {
        Csv::read_with_policy(r, RoomTypePolicy::Strict)
    }
}

impl crate::traits::WriteFormat for Csv {
    fn write<W: Write>(w: W, ds: &Dataset) -> Result<()> {
        write_records(w, ds.records())
    }
}

/// Пишет произвольную выборку строк (превью, отфильтрованное представление).
pub fn write_records<'a, W, I>(w: W, records: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a BookingRecord>,
{
    let mut wrt = WriterBuilder::new().from_writer(w);
    let as_u8 = |b: bool| u8::from(b);

    for r in records {
        let out = CsvOutRow {
            booking_id: &r.booking_id,
            total_bill: r.total_bill.to_string(),
            checkin_month: r.checkin_month,
            is_weekend: as_u8(r.is_weekend),
            executive: as_u8(r.room_type_executive),
            standard: as_u8(r.room_type_standard),
            suite: as_u8(r.room_type_suite),
            room_type: r.room_type.as_str(),
        };
        wrt.serialize(out)?;
    }
    wrt.flush()?;
    Ok(())
}
