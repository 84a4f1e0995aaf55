use std::rc::Rc;

use shared::input::{parse_required_amount_input, parse_week_count_input};
use shared::{SessionCommand, SessionController};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_share_link::use_share_link;

#[derive(Properties, PartialEq)]
pub struct AdminPanelProps {
    pub controller: Rc<SessionController>,
    pub on_command: Callback<SessionCommand>,
}

/// Collapsible settings panel: week count, weekly fee and the share link
#[function_component(AdminPanel)]
pub fn admin_panel(props: &AdminPanelProps) -> Html {
    let is_open = use_state(|| true);
    let share = use_share_link(props.controller.clone());

    let config = props.controller.config();
    let max_weeks = props.controller.settings().max_weeks;

    let on_toggle = {
        let is_open = is_open.clone();
        Callback::from(move |_: MouseEvent| is_open.set(!*is_open))
    };

    let on_week_count_change = {
        let on_command = props.on_command.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let count = parse_week_count_input(&input.value(), max_weeks);
            on_command.emit(SessionCommand::SetWeekCount(i64::from(count)));
        })
    };

    let on_required_amount_change = {
        let on_command = props.on_command.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let amount = parse_required_amount_input(&input.value());
            on_command.emit(SessionCommand::SetRequiredAmount(amount));
        })
    };

    let on_generate = {
        let generate = share.actions.generate.clone();
        Callback::from(move |_: MouseEvent| generate.emit(()))
    };

    let on_copy = {
        let copy = share.actions.copy.clone();
        Callback::from(move |_: MouseEvent| copy.emit(()))
    };

    html! {
        <section class="admin-panel">
            <button class="admin-panel-toggle" onclick={on_toggle} aria-expanded={(*is_open).to_string()}>
                <span>{"แผงควบคุม"}</span>
                <span class={if *is_open { "chevron open" } else { "chevron" }}>{"▾"}</span>
            </button>

            {if *is_open {
                html! {
                    <div class="admin-panel-body">
                        <div class="settings-row">
                            <div class="form-group">
                                <label for="week-count">{"จำนวนสัปดาห์:"}</label>
                                <input
                                    type="number"
                                    id="week-count"
                                    min="1"
                                    max={max_weeks.to_string()}
                                    value={config.week_count.to_string()}
                                    oninput={on_week_count_change}
                                />
                            </div>
                            <div class="form-group">
                                <label for="required-amount">{"ยอดที่ต้องชำระ (บาท/สัปดาห์):"}</label>
                                <input
                                    type="number"
                                    id="required-amount"
                                    min="0"
                                    value={config.required_amount.to_string()}
                                    oninput={on_required_amount_change}
                                />
                            </div>
                        </div>

                        <button class="btn btn-primary" onclick={on_generate}>
                            {"สร้างลิงก์สำหรับแชร์"}
                        </button>

                        {if let Some(link) = share.share_link.as_ref() {
                            html! {
                                <div class="share-link-box">
                                    <p>{"ลิงก์สำหรับดูอย่างเดียว (Read-Only):"}</p>
                                    <div class="share-link-row">
                                        <input type="text" readonly=true value={link.clone()} />
                                        <button
                                            class={if share.copied { "btn btn-copied" } else { "btn btn-copy" }}
                                            onclick={on_copy}
                                        >
                                            {if share.copied { "คัดลอกแล้ว!" } else { "คัดลอก" }}
                                        </button>
                                    </div>
                                </div>
                            }
                        } else { html! {} }}
                    </div>
                }
            } else { html! {} }}
        </section>
    }
}
