//! Deterministic prompt rendering.
//!
//! Callers must validate requests first; nothing here re-checks inputs.

use citysim_core::{CityModel, PredictionRequest};

use crate::forecast::ForecastDomain;

const RESPONSE_CONTRACT: &str = r#"Provide your response in EXACTLY this JSON format:
{
    "predicted_price": 0.0,
    "confidence": 0.0,
    "factors": ["factor1", "factor2"],
    "analysis": "Your analysis here"
}
"confidence" must be a number between 0 and 1."#;

/// Forecast prompt for `domain`.
pub fn forecast_prompt(domain: ForecastDomain, request: &PredictionRequest) -> String {
    let price = format_currency(request.current_price);
    let growth = request.population_growth_percent;
    let years = request.years_ahead;

    match domain {
        ForecastDomain::Housing => format!(
            "You are a real estate market analyst. Predict the housing price in {years} years based on:\n\
             - Current price: {price}\n\
             - Annual population growth rate: {growth}%\n\n\
             {RESPONSE_CONTRACT}\n"
        ),
        ForecastDomain::Food => {
            let item = request.subject().unwrap_or("the food item");
            format!(
                "As a food market analyst expert, predict the future price of {item} based on:\n\
                 - Current price: {price}\n\
                 - Annual population growth: {growth}%\n\
                 - Years ahead: {years}\n\n\
                 {RESPONSE_CONTRACT}\n\n\
                 Consider these factors in your analysis:\n\
                 1. Population growth impact on food demand\n\
                 2. Agricultural and production trends\n\
                 3. Supply chain factors\n\
                 4. Economic indicators\n\
                 5. Food-specific market conditions\n"
            )
        }
    }
}

/// Free-text infrastructure advice prompt for an updated city model.
pub fn infrastructure_advice_prompt(model: &CityModel, aliens_count: u32, comments: &str) -> String {
    let notes = if comments.is_empty() { "none" } else { comments };
    format!(
        "You are a city infrastructure advisor AI. As a futuristic city planner, you are monitoring a city named {}.\n\
         The current base population is {} with a growth rate of {}%.\n\
         The base housing price is {}.\n\
         {} aliens arrived today.\n\
         Additional notes: {}\n\n\
         Given this, provide infrastructure recommendations for the next 10 years.\n\
         Focus on housing, energy, transportation, and any alien-specific needs.",
        model.city_name(),
        model.base_population(),
        model.base_growth_rate_percent(),
        format_currency(model.base_price()),
        aliens_count,
        notes
    )
}

/// `$1,234,567.80` style: two decimals, comma thousands separators.
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_is_grouped_with_two_decimals() {
        assert_eq!(format_currency(300000.0), "$300,000.00");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(999.5), "$999.50");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(-1500.0), "-$1,500.00");
    }

    #[test]
    fn housing_prompt_embeds_inputs_verbatim() {
        let req = PredictionRequest::new(300000.0, 2.5, 10);
        let prompt = forecast_prompt(ForecastDomain::Housing, &req);
        assert!(prompt.contains("in 10 years"));
        assert!(prompt.contains("Current price: $300,000.00"));
        assert!(prompt.contains("growth rate: 2.5%"));
        assert!(prompt.contains("\"predicted_price\""));
    }

    #[test]
    fn food_prompt_names_the_subject() {
        let req = PredictionRequest::new(3.2, 1.0, 5).with_subject("Rice");
        let prompt = forecast_prompt(ForecastDomain::Food, &req);
        assert!(prompt.contains("future price of Rice"));
        assert!(prompt.contains("Current price: $3.20"));
        assert!(prompt.contains("Years ahead: 5"));
        assert!(prompt.contains("Supply chain factors"));
    }

    #[test]
    fn prompts_are_deterministic() {
        let req = PredictionRequest::new(42.0, 0.3, 2).with_subject("Milk");
        assert_eq!(
            forecast_prompt(ForecastDomain::Food, &req),
            forecast_prompt(ForecastDomain::Food, &req)
        );
    }

    #[test]
    fn advice_prompt_describes_the_city() {
        let model = CityModel::new("Zenith", 100000, 2.6, 300000.0).unwrap();
        let prompt = infrastructure_advice_prompt(&model, 6, "");
        assert!(prompt.contains("city named Zenith"));
        assert!(prompt.contains("population is 100000 with a growth rate of 2.6%"));
        assert!(prompt.contains("$300,000.00"));
        assert!(prompt.contains("6 aliens arrived today"));
        assert!(prompt.contains("Additional notes: none"));
    }
}
