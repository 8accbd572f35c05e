use crate::classifier::IconStyleTheme;
use crate::models::{ClassifiedSlot, ViewModel};
use crate::pipeline::PipelineError;

/// Destination for the outcome of a pipeline run
pub trait RenderSink {
    fn show_forecast(&mut self, view: &ViewModel);
    fn show_error(&mut self, error: &PipelineError);
}

/// Hands a run outcome to the matching sink method
pub fn present<S: RenderSink + ?Sized>(sink: &mut S, outcome: &Result<ViewModel, PipelineError>) {
    match outcome {
        Ok(view) => sink.show_forecast(view),
        Err(error) => sink.show_error(error),
    }
}

/// Renders the widget as human-readable text
#[derive(Debug, Default)]
pub struct TextRenderer {
    theme: IconStyleTheme,
    output: String,
}

impl TextRenderer {
    pub fn new(theme: IconStyleTheme) -> Self {
        Self {
            theme,
            output: String::new(),
        }
    }

    pub fn into_output(self) -> String {
        self.output
    }

    fn format_current(&self, slot: &ClassifiedSlot) -> String {
        let (rain_label, comfort_label) = match self.theme {
            IconStyleTheme::Emoji => ("☔ 降雨機率", "😊 舒適度"),
            IconStyleTheme::Text => ("Chance of rain", "Comfort"),
        };

        format!(
            "{}\n  {} {}\n  {}\n  {}: {}\n  {}: {}\n",
            self.theme.period(slot.period),
            self.theme.icon(slot.icon),
            slot.weather,
            slot.temperature_range(),
            rain_label,
            slot.rain,
            comfort_label,
            slot.comfort
        )
    }

    fn format_future(&self, slot: &ClassifiedSlot) -> String {
        let rain_label = match self.theme {
            IconStyleTheme::Emoji => "☔ 降雨",
            IconStyleTheme::Text => "Rain",
        };

        format!(
            "  {} | {} {} | {} | {}: {}\n",
            self.theme.period(slot.period),
            self.theme.icon(slot.icon),
            slot.weather,
            slot.temperature_range(),
            rain_label,
            slot.rain
        )
    }

    fn error_message(&self, error: &PipelineError) -> String {
        match self.theme {
            IconStyleTheme::Emoji => {
                let reason = match error {
                    PipelineError::Http { status_code } => {
                        format!("HTTP 錯誤! 狀態碼: {}", status_code)
                    }
                    PipelineError::Transport(e) => format!("網路連線失敗 ({})", e),
                    PipelineError::MalformedPayload(_) | PipelineError::Validation { .. } => {
                        "API 回傳資料格式錯誤或無預報資料。".to_string()
                    }
                };
                format!("🚫 資料載入失敗: {}，請檢查 API 網址是否正確。", reason)
            }
            IconStyleTheme::Text => format!("Failed to load forecast: {}", error),
        }
    }
}

impl RenderSink for TextRenderer {
    fn show_forecast(&mut self, view: &ViewModel) {
        let mut output = match self.theme {
            IconStyleTheme::Emoji => format!("{} 天氣預報\n", view.city_name),
            IconStyleTheme::Text => format!("{} Weather Forecast\n", view.city_name),
        };
        if let Some(notice) = &view.update_notice {
            match self.theme {
                IconStyleTheme::Emoji => output.push_str(&format!("更新時間: {}\n", notice)),
                IconStyleTheme::Text => output.push_str(&format!("Updated: {}\n", notice)),
            }
        }
        output.push('\n');
        output.push_str(&self.format_current(&view.current));

        if !view.future.is_empty() {
            output.push('\n');
            for slot in &view.future {
                output.push_str(&self.format_future(slot));
            }
        }
        self.output = output;
    }

    fn show_error(&mut self, error: &PipelineError) {
        self.output = self.error_message(error);
    }
}

/// Renders the widget as pretty-printed JSON for programmatic consumers
#[derive(Debug, Default)]
pub struct JsonRenderer {
    output: String,
}

impl JsonRenderer {
    pub fn into_output(self) -> String {
        self.output
    }
}

impl RenderSink for JsonRenderer {
    fn show_forecast(&mut self, view: &ViewModel) {
        self.output = serde_json::to_string_pretty(view).unwrap_or_else(|e| {
            tracing::error!("Failed to serialize view model: {}", e);
            String::new()
        });
    }

    fn show_error(&mut self, error: &PipelineError) {
        let body = serde_json::json!({
            "error": error.kind(),
            "message": error.to_string(),
        });
        self.output = body.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{IconCategory, PeriodLabel};
    use crate::fetch::TransportError;

    fn slot(
        start_time: &str,
        weather: &str,
        icon: IconCategory,
        period: PeriodLabel,
    ) -> ClassifiedSlot {
        ClassifiedSlot {
            start_time: start_time.to_string(),
            weather: weather.to_string(),
            min_temp: "18".to_string(),
            max_temp: "24°C".to_string(),
            rain: "20%".to_string(),
            comfort: "舒適".to_string(),
            icon,
            period,
        }
    }

    fn view() -> ViewModel {
        ViewModel {
            city_name: "高雄市".to_string(),
            update_notice: Some("2025-12-11 05:00:00".to_string()),
            current: slot(
                "2025-12-11 06:00:00",
                "多雲時晴",
                IconCategory::Clear,
                PeriodLabel::Morning,
            ),
            future: vec![slot(
                "2025-12-11 18:00:00",
                "陰短暫雨",
                IconCategory::Cloudy,
                PeriodLabel::Evening,
            )],
        }
    }

    #[test]
    fn test_text_emoji_forecast() {
        let mut renderer = TextRenderer::new(IconStyleTheme::Emoji);
        present(&mut renderer, &Ok(view()));
        let output = renderer.into_output();

        assert!(output.starts_with("高雄市 天氣預報\n"));
        assert!(output.contains("更新時間: 2025-12-11 05:00:00"));
        assert!(output.contains("🌅 早晨"));
        assert!(output.contains("☀️ 多雲時晴"));
        assert!(output.contains("18~24°C"));
        assert!(output.contains("☔ 降雨機率: 20%"));
        assert!(output.contains("😊 舒適度: 舒適"));
        assert!(output.contains("🌃 晚上 | ☁️ 陰短暫雨 | 18~24°C | ☔ 降雨: 20%"));
    }

    #[test]
    fn test_text_plain_forecast_without_notice() {
        let mut view = view();
        view.update_notice = None;
        view.future.clear();

        let mut renderer = TextRenderer::new(IconStyleTheme::Text);
        renderer.show_forecast(&view);
        let output = renderer.into_output();

        assert!(output.starts_with("高雄市 Weather Forecast\n"));
        assert!(!output.contains("Updated"));
        assert!(output.contains("Morning"));
        assert!(output.contains("Sunny 多雲時晴"));
        assert!(!output.contains(" | "));
    }

    #[test]
    fn test_text_emoji_errors() {
        let mut renderer = TextRenderer::new(IconStyleTheme::Emoji);
        present(&mut renderer, &Err(PipelineError::Http { status_code: 500 }));
        let expected = concat!(
            "🚫 資料載入失敗: HTTP 錯誤! 狀態碼: 500，",
            "請檢查 API 網址是否正確。"
        );
        assert_eq!(renderer.into_output(), expected);

        let mut renderer = TextRenderer::new(IconStyleTheme::Emoji);
        renderer.show_error(&PipelineError::Validation {
            reason: "missing forecast data".to_string(),
        });
        let output = renderer.into_output();
        assert!(output.contains("API 回傳資料格式錯誤或無預報資料。"));
    }

    #[test]
    fn test_text_plain_error() {
        let mut renderer = TextRenderer::new(IconStyleTheme::Text);
        renderer.show_error(&PipelineError::Transport(TransportError::Timeout));
        assert_eq!(
            renderer.into_output(),
            "Failed to load forecast: transport error: request timed out"
        );
    }

    #[test]
    fn test_json_forecast() {
        let mut renderer = JsonRenderer::default();
        present(&mut renderer, &Ok(view()));
        let value: serde_json::Value = serde_json::from_str(&renderer.into_output()).unwrap();

        assert_eq!(value["city_name"], "高雄市");
        assert_eq!(value["current"]["icon"], "clear");
        assert_eq!(value["current"]["period"], "morning");
        assert_eq!(value["current"]["min_temp"], "18");
        assert_eq!(value["future"][0]["icon"], "cloudy");
    }

    #[test]
    fn test_json_error() {
        let mut renderer = JsonRenderer::default();
        renderer.show_error(&PipelineError::Http { status_code: 404 });
        let value: serde_json::Value = serde_json::from_str(&renderer.into_output()).unwrap();

        assert_eq!(value["error"], "http");
        assert_eq!(value["message"], "HTTP error, status code 404");
    }
}
