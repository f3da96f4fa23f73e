use chrono::NaiveDate;
use hotelrevlib::{
    features::{BookingInput, Feature, FeatureVector},
    model::RoomType,
    predict::PredictionService,
    traits::ModelResult,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: прогноз с моделью-замыканием вместо обученного артефакта
    let model = |fv: &FeatureVector| -> ModelResult {
        Ok(fv.get(Feature::RoomPrice) * fv.get(Feature::StayDuration) * 1.05
            + fv.get(Feature::RoomServiceCost))
    };

    let checkin = NaiveDate::from_ymd_opt(2025, 3, 15).ok_or("bad date")?;
    let input = BookingInput::new(2, 5000, 500, checkin, RoomType::Standard)?;
    let f = PredictionService::new(&model).forecast(&input)?;

    println!("{}", serde_json::to_string_pretty(&f)?);
    Ok(())
}
