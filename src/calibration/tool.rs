//! Writes calibrated values back into the config document.

use anyhow::{anyhow, Result};
use serde_json::{json, Map, Value};

use crate::automation::config::{ConfigDocument, NameList, TargetEntry};
use crate::calibration::coords::normalize_point;
use crate::calibration::state::{CalibrationField, Pick};

/// Stores `pick` under `field` and returns the stored JSON value.
///
/// `index` selects the key for `position`; an empty `keys` list gets a first
/// entry so index 0 always works.
pub fn apply_pick(
    doc: &mut ConfigDocument,
    field: CalibrationField,
    index: usize,
    pick: Pick,
    screen_size: (u32, u32),
) -> Result<Value> {
    match (field, pick) {
        (CalibrationField::NameRegion, Pick::Region(rect)) => {
            let value = json!(rect.to_values());
            doc.card_name_range = Some(value.clone());
            Ok(value)
        }
        (CalibrationField::PriceRegion, Pick::Region(rect)) => {
            let value = json!(rect.to_values());
            doc.card_price_range = Some(value.clone());
            Ok(value)
        }
        (CalibrationField::PurchaseButton, Pick::Point(x, y)) => {
            let point = normalize_point((x, y), screen_size);
            let value = json!([point.x, point.y]);
            doc.purchase_btn_location = Some(value.clone());
            Ok(value)
        }
        (CalibrationField::Position, Pick::Point(x, y)) => {
            if doc.keys.is_empty() {
                doc.keys.push(TargetEntry::default());
            }
            let count = doc.keys.len();
            let entry = doc
                .keys
                .get_mut(index)
                .ok_or_else(|| anyhow!("keys[{}] does not exist ({} keys)", index, count))?;
            let point = normalize_point((x, y), screen_size);
            let value = json!([point.x, point.y]);
            entry.position = Some(value.clone());
            Ok(value)
        }
        (field, pick) => Err(anyhow!("{:?} cannot be stored as {}", pick, field.key())),
    }
}

/// Sets the recognized card name on the last key, appending one when `keys`
/// is empty.
pub fn apply_recognized_name(doc: &mut ConfigDocument, name: &str) {
    if doc.keys.is_empty() {
        doc.keys.push(TargetEntry::default());
    }
    if let Some(entry) = doc.keys.last_mut() {
        entry.name = NameList::One(name.to_string());
    }
}

/// `{"success": true, "<key>": value, "config": {...}}`
pub fn success_line(field: CalibrationField, value: Value, doc: &ConfigDocument) -> Result<String> {
    let mut output = Map::new();
    output.insert("success".to_string(), Value::Bool(true));
    output.insert(field.key().to_string(), value);
    output.insert("config".to_string(), serde_json::to_value(doc)?);
    Ok(Value::Object(output).to_string())
}

/// `{"success": false, "error": "..."}`
pub fn failure_line(error: &str) -> String {
    json!({ "success": false, "error": error }).to_string()
}
