use crate::model::attendance::DeviceType;

/// Classify a `User-Agent` value by substring, case-insensitively.
pub fn classify_device(user_agent: &str) -> DeviceType {
    if user_agent.is_empty() {
        return DeviceType::Unknown;
    }

    let ua = user_agent.to_lowercase();

    if ["mobile", "android", "iphone"].iter().any(|k| ua.contains(k)) {
        DeviceType::Mobile
    } else if ["tablet", "ipad"].iter().any(|k| ua.contains(k)) {
        DeviceType::Tablet
    } else {
        DeviceType::Desktop
    }
}
