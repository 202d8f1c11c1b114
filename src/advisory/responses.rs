//! Advisory reply templates, one per intent.

use super::intent::{Classification, GENERIC_CEREAL, Intent};

const GREETING: &str = "🌾 Hello! Welcome to your AI farming assistant. I'm here to help with:\n\
• Crop cultivation and management\n\
• Soil health and fertilization\n\
• Pest and disease control\n\
• Irrigation and water management\n\
• Weather-related farming advice\n\n\
What farming challenge can I help you with today?";

/// Body of the cereal reply; the heading carries the crop name.
const CEREAL_BODY: &str = "📅 **Timing**: Plant during optimal season for your region\n\
🌱 **Seeding**: Maintain proper seed rate (20-25 kg/ha for wheat, 15-20 kg/ha for rice)\n\
💧 **Water**: Critical stages - tillering, flowering, grain filling\n\
🧪 **Nutrition**: Split nitrogen application (50% basal, 25% tillering, 25% flowering)\n\
🔍 **Monitoring**: Regular field inspection for pests and diseases\n\n\
Need specific advice for your growth stage or location?";

const VEGETABLE: &str = "🍅 Vegetable Cultivation Guide:\n\n\
🌱 **Seedlings**: Use certified, disease-free seedlings\n\
🔄 **Rotation**: Practice 3-4 year crop rotation\n\
🛡️ **Disease Prevention**: \n   \
• Apply copper-based fungicides preventively\n   \
• Ensure good air circulation\n   \
• Avoid overhead irrigation\n\
💧 **Irrigation**: Drip irrigation at root zone\n\
🌿 **Mulching**: Use organic mulch to retain moisture\n\n\
Which specific vegetable are you growing?";

const IRRIGATION: &str = "💧 Smart Irrigation Management:\n\n\
🎯 **Drip Irrigation Benefits**:\n   \
• 30-50% water savings\n   \
• Better nutrient delivery\n   \
• Reduced weed growth\n   \
• Lower disease pressure\n\n\
⏰ **Timing**: Early morning (6-8 AM) or evening (6-8 PM)\n\
📊 **Monitoring**: Check soil moisture at root depth\n\
🌿 **Mulching**: Reduces evaporation by 50-70%\n\n\
💡 Pro tip: Use ET₀ data to calculate crop water requirements!";

const SOIL_HEALTH: &str = "🧪 Soil Health Management:\n\n\
📋 **Annual Testing**: pH, EC, organic matter, NPK\n\
🎯 **Target pH**: 6.0-7.5 for most crops\n\
🌿 **Organic Matter**: \n   \
• Add compost (5-10 tonnes/ha)\n   \
• Green manure crops\n   \
• Crop residue incorporation\n\n\
⚗️ **Fertilizer Strategy**:\n   \
• Soil test-based application\n   \
• Split nitrogen doses\n   \
• Balance NPK ratio\n\n\
🔄 **Improvement**: Cover crops, reduced tillage, rotation";

const PEST_CONTROL: &str = "🛡️ Integrated Pest Management (IPM):\n\n\
🔍 **Monitoring**: \n   \
• Weekly field scouting\n   \
• Pheromone traps\n   \
• Economic threshold levels\n\n\
🌱 **Prevention**:\n   \
• Resistant varieties\n   \
• Crop rotation\n   \
• Biological control agents\n\n\
🌿 **Natural Solutions**:\n   \
• Neem oil sprays\n   \
• Beneficial insects\n   \
• Companion planting\n\n\
⚗️ **Chemical Control**: Only when necessary, rotate modes of action";

const WEATHER: &str = "🌤️ Weather-Smart Farming:\n\n\
📱 **Monitoring**: Use weather apps and local stations\n\
☔ **Rainfall Management**:\n   \
• Harvest rainwater\n   \
• Improve drainage\n   \
• Adjust planting dates\n\n\
🌡️ **Temperature Stress**:\n   \
• Shade nets for extreme heat\n   \
• Mulching for temperature regulation\n   \
• Proper ventilation in protected cultivation\n\n\
💨 **Wind Protection**: Windbreaks and shelter belts";

const MARKET: &str = "💰 Market Intelligence & Economics:\n\n\
📊 **Price Tracking**: Monitor daily market rates\n\
📅 **Timing**: Plan harvest for peak prices\n\
🎯 **Quality**: Focus on premium grade produce\n\
🤝 **Direct Sales**: Farmers markets, online platforms\n\
💼 **Value Addition**: Processing, packaging\n\
📋 **Record Keeping**: Track costs and returns\n\n\
💡 Tip: Diversify crops to spread market risk!";

/// Reply for anything the classifier could not place.
pub const FALLBACK: &str = "🌾 Welcome to your AI Farming Assistant! I can help with:\n\n\
🌱 **Crop Management**: Cultivation practices, varieties\n\
💧 **Water Management**: Irrigation, drainage systems\n\
🧪 **Soil Health**: Testing, fertilization, improvement\n\
🛡️ **Pest Control**: IPM strategies, organic solutions\n\
🌤️ **Weather Advisory**: Climate-smart practices\n\
💰 **Market Intelligence**: Pricing, selling strategies\n\n\
Tell me about your crop, growth stage, and location for personalized advice!";

/// Render the advisory reply for a classification.
pub fn respond(classification: &Classification) -> String {
    match classification.intent {
        Intent::Greeting => GREETING.to_string(),
        Intent::CerealCrop => {
            let crop = classification.crop.unwrap_or(GENERIC_CEREAL);
            format!("🌾 {} Cultivation Tips:\n\n{}", title_case(crop), CEREAL_BODY)
        }
        Intent::Vegetable => VEGETABLE.to_string(),
        Intent::Irrigation => IRRIGATION.to_string(),
        Intent::SoilHealth => SOIL_HEALTH.to_string(),
        Intent::PestControl => PEST_CONTROL.to_string(),
        Intent::Weather => WEATHER.to_string(),
        Intent::Market => MARKET.to_string(),
        Intent::Fallback => FALLBACK.to_string(),
    }
}

/// Upper-case the first letter of each whitespace-separated word.
fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
