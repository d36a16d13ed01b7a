use crate::models::{ChartKind, Layout, PageView};
use crate::services::series_service::{MAX_SAMPLES, MIN_SAMPLES};
use crate::utils::{escape_html, Table};

/// Name of the hidden form field and cookie carrying the XSRF token
pub const XSRF_FIELD: &str = "_xsrf";

const STYLE: &str = "body{font-family:sans-serif;margin:0;display:flex}\
aside{width:260px;min-height:100vh;padding:1rem;background:#f0f2f6}\
main{flex:1;padding:1rem 2rem}\
main.centered{max-width:760px;margin:0 auto}\
.columns{display:flex;gap:2rem;flex-wrap:wrap}\
.metric{margin-bottom:1rem}.metric .label{color:#555}.metric .value{font-size:2rem}\
table.data{border-collapse:collapse;max-height:320px;overflow-y:auto;display:block}\
table.data td,table.data th{border:1px solid #ddd;padding:2px 8px}\
td.num{text-align:right;font-family:monospace}";

/// Render the full dashboard page
pub fn render_page(view: &PageView) -> String {
    let config = view.config;
    let main_class = match config.layout {
        Layout::Wide => "wide",
        Layout::Centered => "centered",
    };

    let mut html = String::with_capacity(16 * 1024 + view.chart_svg.len());
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>{} {}</title>\n",
        escape_html(&config.page_icon),
        escape_html(&config.page_title)
    ));
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));

    html.push_str(&render_sidebar(view));

    html.push_str(&format!("<main class=\"{}\">\n", main_class));
    html.push_str(&format!("<h1>{}</h1>\n", escape_html(&config.title)));
    html.push_str(&format!("<h3>{}</h3>\n", escape_html(&config.subtitle)));

    // Data
    html.push_str("<h2>Generated Sample Data</h2>\n");
    html.push_str(&render_data_table(view));
    html.push('\n');

    // Chart and metrics side by side
    html.push_str("<h2>Data Visualization</h2>\n<div class=\"columns\">\n");
    html.push_str(&format!(
        "<div class=\"chart\" data-kind=\"{}\">\n{}\n</div>\n",
        view.chart_kind.label(),
        view.chart_svg
    ));
    html.push_str("<div class=\"metrics\">\n");
    html.push_str(&render_metric("Number of Samples", &view.metrics.sample_count.to_string()));
    html.push_str(&render_metric("Final Value", &format!("{:.2}", view.metrics.final_value)));
    html.push_str(&render_metric("Value Change", &format!("{:.2}", view.metrics.value_change)));
    html.push_str("</div>\n</div>\n");

    // Footer
    html.push_str("<hr>\n<p><strong>Deployment Info</strong></p>\n<ul>\n");
    for item in &config.deployment_info {
        html.push_str(&format!("<li>{}</li>\n", escape_html(item)));
    }
    html.push_str("</ul>\n</main>\n</body>\n</html>\n");

    html
}

fn render_sidebar(view: &PageView) -> String {
    let mut html = String::from("<aside>\n");
    html.push_str(&format!("<h2>{}</h2>\n", escape_html(&view.config.sidebar_header)));
    html.push_str("<form method=\"get\" action=\"/\">\n");

    html.push_str(&format!(
        "<label for=\"samples\">Sample Size: <output id=\"samples-out\">{samples}</output></label><br>\n\
         <input type=\"range\" id=\"samples\" name=\"samples\" min=\"{min}\" max=\"{max}\" value=\"{samples}\" \
         oninput=\"document.getElementById('samples-out').value=this.value\"><br>\n",
        samples = view.samples,
        min = MIN_SAMPLES,
        max = MAX_SAMPLES,
    ));

    html.push_str("<label for=\"chart\">Chart Type</label><br>\n<select id=\"chart\" name=\"chart\">\n");
    for kind in ChartKind::ALL {
        let selected = if kind == view.chart_kind { " selected" } else { "" };
        html.push_str(&format!(
            "<option value=\"{label}\"{selected}>{label}</option>\n",
            label = kind.label(),
            selected = selected,
        ));
    }
    html.push_str("</select><br>\n");

    if let Some(token) = view.xsrf_token {
        html.push_str(&format!(
            "<input type=\"hidden\" name=\"{}\" value=\"{}\">\n",
            XSRF_FIELD,
            escape_html(token)
        ));
    }

    html.push_str("<button type=\"submit\">Update</button>\n</form>\n</aside>\n");
    html
}

fn render_data_table(view: &PageView) -> String {
    let mut table = Table::new(vec!["date", "value"]).numeric(1);
    for point in &view.series.points {
        table.add_row(vec![
            point.date.format("%Y-%m-%d").to_string(),
            format!("{:.6}", point.value),
        ]);
    }
    table.render()
}

fn render_metric(label: &str, value: &str) -> String {
    format!(
        "<div class=\"metric\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>\n",
        escape_html(label),
        escape_html(value)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PageConfig, SeriesMetrics};
    use crate::services::series_service::generate_series_with;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn render(samples: usize, chart_kind: ChartKind, config: &PageConfig, xsrf: Option<&str>) -> String {
        let series = generate_series_with(samples, &mut StdRng::seed_from_u64(3));
        let metrics = SeriesMetrics::from_series(&series);
        let view = PageView {
            config,
            samples,
            chart_kind,
            series: &series,
            metrics,
            chart_svg: "<svg id=\"chart\"></svg>",
            xsrf_token: xsrf,
        };
        render_page(&view)
    }

    #[test]
    fn test_page_sections() {
        let config = PageConfig::default();
        let html = render(10, ChartKind::Line, &config, None);

        assert!(html.contains("<title>🚀 AWS EKS Demo App</title>"));
        assert!(html.contains("Generated Sample Data"));
        assert!(html.contains("Data Visualization"));
        assert!(html.contains("<svg id=\"chart\"></svg>"));
        assert!(html.contains("Number of Samples"));
        assert!(html.contains("Final Value"));
        assert!(html.contains("Value Change"));
        assert!(html.contains("<li>🐳 Image stored in Amazon ECR</li>"));
        assert!(html.contains("<td>2023-01-01</td>"));
        assert!(html.contains("<td>2023-01-10</td>"));
        assert!(!html.contains("2023-01-11"));
    }

    #[test]
    fn test_selected_chart_kind_is_marked() {
        let config = PageConfig::default();
        let html = render(20, ChartKind::Area, &config, None);

        assert!(html.contains("<option value=\"Area\" selected>Area</option>"));
        assert!(html.contains("<option value=\"Line\">Line</option>"));
        assert!(html.contains("data-kind=\"Area\""));
        assert!(html.contains("value=\"20\""));
    }

    #[test]
    fn test_metrics_have_two_decimals() {
        let config = PageConfig::default();
        let series = generate_series_with(30, &mut StdRng::seed_from_u64(3));
        let metrics = SeriesMetrics::from_series(&series);
        let html = render(30, ChartKind::Line, &config, None);

        assert!(html.contains(&format!("<div class=\"value\">{:.2}</div>", metrics.final_value)));
        assert!(html.contains(&format!("<div class=\"value\">{:.2}</div>", metrics.value_change)));
    }

    #[test]
    fn test_xsrf_token_only_when_given() {
        let config = PageConfig::default();
        let with = render(10, ChartKind::Bar, &config, Some("abc123"));
        let without = render(10, ChartKind::Bar, &config, None);

        assert!(with.contains("name=\"_xsrf\" value=\"abc123\""));
        assert!(!without.contains("_xsrf"));
    }

    #[test]
    fn test_config_text_is_escaped() {
        let config = PageConfig {
            title: "<script>x</script>".to_string(),
            layout: Layout::Centered,
            ..PageConfig::default()
        };
        let html = render(10, ChartKind::Line, &config, None);

        assert!(html.contains("<h1>&lt;script&gt;x&lt;/script&gt;</h1>"));
        assert!(html.contains("<main class=\"centered\">"));
    }
}
