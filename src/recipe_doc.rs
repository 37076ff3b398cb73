use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::sync::OnceLock;
use tracing::warn;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    /// Quantity at scale 1.
    #[serde(default, deserialize_with = "lenient_text")]
    pub quantity: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub unit: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            unit: unit.into(),
        }
    }
}

/// The shape stored in the note's `content.json` field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDocument {
    #[serde(default, deserialize_with = "lenient_text")]
    pub duration: String,
    /// `None` serializes as `null`, which is what a scale that failed to parse
    /// turns into on the way out.
    #[serde(default, deserialize_with = "lenient_scale")]
    pub scale: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub scale_reference: String,
    #[serde(default, deserialize_with = "lenient_ingredients")]
    pub ingredients: Vec<Ingredient>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub main_recipe: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub for_next_time: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub avoid_doing: String,
}

impl RecipeDocument {
    /// Anything other than a non-empty JSON object yields the empty document.
    pub fn from_note_json(raw: Option<&Value>) -> Self {
        let Some(raw) = raw.filter(|value| value.as_object().is_some_and(|map| !map.is_empty()))
        else {
            return Self::default();
        };
        match RecipeDocument::deserialize(raw) {
            Ok(doc) => doc,
            Err(err) => {
                warn!(error = %err, "note content is not a recipe, starting empty");
                Self::default()
            }
        }
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        // 200.0 reads back as "200", matching what a browser shows.
        Value::Number(n) => n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string()),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

fn lenient_scale<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float(&s),
        _ => None,
    })
}

fn lenient_ingredients<'de, D>(deserializer: D) -> Result<Vec<Ingredient>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .iter()
        .map(|item| match item {
            Value::Object(_) => Ingredient::deserialize(item).unwrap_or_default(),
            _ => Ingredient::default(),
        })
        .collect())
}

/// Parses the longest numeric prefix of `text`, the way a browser's
/// `parseFloat` does: `"2x"` is 2, `"abc"` is `None`.
pub fn parse_float(text: &str) -> Option<f64> {
    static RE_NUMBER: OnceLock<Regex> = OnceLock::new();
    let re_number = RE_NUMBER.get_or_init(|| {
        Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").unwrap()
    });

    let found = re_number.find(text.trim_start())?;
    found.as_str().parse::<f64>().ok()
}

/// Rounds to two decimals, then drops trailing zeros and a bare decimal point.
pub fn format_quantity(value: f64) -> String {
    static RE_TRAILING: OnceLock<Regex> = OnceLock::new();
    let re_trailing = RE_TRAILING.get_or_init(|| Regex::new(r"\.?0+$").unwrap());

    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    // -0 prints as "0".
    let value = if value == 0.0 { 0.0 } else { value };
    // Odd eighths are the only exact binary ties at two decimals; those round
    // away from zero, everything else is already nearest.
    let eighths = value * 8.0;
    let fixed = if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        format!("{:.2}", (value * 100.0).round() / 100.0)
    } else {
        format!("{value:.2}")
    };
    re_trailing.replace(&fixed, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn formats_quantities_without_trailing_zeros() {
        assert_eq!(format_quantity(200.0), "200");
        assert_eq!(format_quantity(200.5), "200.5");
        assert_eq!(format_quantity(100.0), "100");
        assert_eq!(format_quantity(0.333), "0.33");
        assert_eq!(format_quantity(33.333 * 1.5), "50");
        assert_eq!(format_quantity(0.0), "0");
        assert_eq!(format_quantity(-0.0), "0");
    }

    #[test]
    fn eighths_round_half_up() {
        assert_eq!(format_quantity(0.125), "0.13");
        assert_eq!(format_quantity(0.375), "0.38");
        assert_eq!(format_quantity(0.625), "0.63");
        assert_eq!(format_quantity(2.875), "2.88");
        assert_eq!(format_quantity(-0.125), "-0.13");
        assert_eq!(format_quantity(0.25), "0.25");
        assert_eq!(format_quantity(1.5), "1.5");
    }

    #[test]
    fn non_finite_quantities_print_like_a_browser() {
        assert_eq!(format_quantity(f64::INFINITY), "Infinity");
        assert_eq!(format_quantity(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_quantity(f64::NAN), "NaN");
    }

    #[test]
    fn parses_numeric_prefix_like_a_browser() {
        assert_eq!(parse_float("2"), Some(2.0));
        assert_eq!(parse_float("  1.5 servings"), Some(1.5));
        assert_eq!(parse_float(".5"), Some(0.5));
        assert_eq!(parse_float("-3e2"), Some(-300.0));
        assert_eq!(parse_float("5."), Some(5.0));
        assert_eq!(parse_float("abc"), None);
        assert_eq!(parse_float(""), None);
        assert_eq!(parse_float("."), None);
    }

    #[test]
    fn empty_or_missing_content_is_the_empty_document() {
        assert_eq!(RecipeDocument::from_note_json(None), RecipeDocument::default());
        assert_eq!(
            RecipeDocument::from_note_json(Some(&json!({}))),
            RecipeDocument::default()
        );
        assert_eq!(
            RecipeDocument::from_note_json(Some(&json!("pancakes"))),
            RecipeDocument::default()
        );
        assert_eq!(
            RecipeDocument::from_note_json(Some(&Value::Null)),
            RecipeDocument::default()
        );
    }

    #[test]
    fn tolerates_missing_and_odd_fields() {
        let raw = json!({
            "duration": "30 min",
            "scale": "2",
            "ingredients": [
                { "name": "Flour", "quantity": 200, "unit": "grams" },
                { "name": "Salt" },
                "stray"
            ],
            "mainRecipe": null,
            "rating": 5
        });
        let doc = RecipeDocument::from_note_json(Some(&raw));

        assert_eq!(doc.duration, "30 min");
        assert_eq!(doc.scale, Some(2.0));
        assert_eq!(doc.scale_reference, "");
        assert_eq!(
            doc.ingredients,
            vec![
                Ingredient::new("Flour", "200", "grams"),
                Ingredient::new("Salt", "", ""),
                Ingredient::default(),
            ]
        );
        assert_eq!(doc.main_recipe, "");
        assert_eq!(doc.avoid_doing, "");
    }

    #[test]
    fn non_array_ingredients_decode_as_empty() {
        let raw = json!({ "ingredients": { "name": "Flour" }, "scale": true });
        let doc = RecipeDocument::from_note_json(Some(&raw));
        assert!(doc.ingredients.is_empty());
        assert_eq!(doc.scale, None);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let doc = RecipeDocument {
            duration: "1 h".to_string(),
            scale: Some(1.5),
            scale_reference: "4 servings".to_string(),
            ingredients: vec![Ingredient::new("Milk", "250", "ml")],
            main_recipe: "Stir.".to_string(),
            for_next_time: "Less sugar".to_string(),
            avoid_doing: "Burning".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({
                "duration": "1 h",
                "scale": 1.5,
                "scaleReference": "4 servings",
                "ingredients": [{ "name": "Milk", "quantity": "250", "unit": "ml" }],
                "mainRecipe": "Stir.",
                "forNextTime": "Less sugar",
                "avoidDoing": "Burning"
            })
        );
    }

    #[test]
    fn unparsed_scale_serializes_as_null() {
        let doc = RecipeDocument::default();
        assert_eq!(serde_json::to_value(&doc).unwrap()["scale"], Value::Null);
    }
}
