use shared::format::{format_currency, format_percent};
use shared::Summary;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SummaryDashboardProps {
    pub summary: Summary,
    pub currency_symbol: String,
}

#[function_component(SummaryDashboard)]
pub fn summary_dashboard(props: &SummaryDashboardProps) -> Html {
    let summary = props.summary;
    let symbol = props.currency_symbol.as_str();

    html! {
        <section class="summary-dashboard">
            <div class="summary-cards">
                <div class="summary-card collected">
                    <h3>{"ยอดรวมที่เก็บได้"}</h3>
                    <p class="summary-amount">{format_currency(summary.total_collected, symbol)}</p>
                </div>
                <div class="summary-card expected">
                    <h3>{"ยอดรวมที่ต้องเก็บ"}</h3>
                    <p class="summary-amount">{format_currency(summary.total_expected, symbol)}</p>
                </div>
                <div class="summary-card remaining">
                    <h3>{"ยอดคงเหลือ"}</h3>
                    <p class="summary-amount">{format_currency(summary.remaining(), symbol)}</p>
                </div>
            </div>

            <div class="progress-panel">
                <div class="progress-labels">
                    <span>{"ภาพรวมการจัดเก็บ"}</span>
                    <span class="progress-value">{format_percent(summary.progress_percent())}</span>
                </div>
                <div class="progress-track">
                    <div
                        class="progress-fill"
                        style={format!("width: {}%", summary.progress_bar_width())}
                    ></div>
                </div>
            </div>
        </section>
    }
}
