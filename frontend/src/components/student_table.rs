use std::rc::Rc;

use shared::format::format_cell_amount;
use shared::input::parse_amount_input;
use shared::{SessionCommand, SessionController, Student, Week};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::editable_student_name::EditableStudentName;

#[derive(Properties, PartialEq)]
pub struct StudentTableProps {
    pub controller: Rc<SessionController>,
    pub on_command: Callback<SessionCommand>,
}

#[function_component(StudentTable)]
pub fn student_table(props: &StudentTableProps) -> Html {
    let controller = &props.controller;
    let is_viewer = controller.is_viewer();
    let weeks: Vec<Week> = controller.config().weeks().collect();
    let symbol = controller.settings().currency_symbol.as_str();

    html! {
        <div class="table-container">
            <table class="payments-table">
                <thead>
                    <tr>
                        <th class="sticky-left">{"รายชื่อนักเรียน"}</th>
                        {for weeks.iter().map(|week| html! {
                            <th>
                                <div class="week-header">
                                    {format!("สัปดาห์ที่ {}", week)}
                                    {if is_viewer { html! {} } else {
                                        let on_command = props.on_command.clone();
                                        let week = *week;
                                        html! {
                                            <button
                                                class="pay-all-btn"
                                                title={format!("บันทึกว่าทุกคนจ่ายครบสำหรับสัปดาห์ที่ {}", week)}
                                                onclick={Callback::from(move |_: MouseEvent| {
                                                    on_command.emit(SessionCommand::PayAllForWeek(week))
                                                })}
                                            >{"✔"}</button>
                                        }
                                    }}
                                </div>
                            </th>
                        })}
                        <th class="sticky-right">{"ยอดรวม"}</th>
                    </tr>
                </thead>
                <tbody>
                    {for controller.roster().iter().map(|student| {
                        student_row(controller, student, &weeks, &props.on_command)
                    })}
                </tbody>
                <tfoot>
                    <tr>
                        <td class="sticky-left">{"ยอดรวมรายสัปดาห์"}</td>
                        {for weeks.iter().map(|week| html! {
                            <td>{format_cell_amount(controller.week_total(*week), symbol)}</td>
                        })}
                        <td class="sticky-right grand-total">
                            {format!("รวมทั้งหมด: {}", format_cell_amount(controller.grand_total(), symbol))}
                        </td>
                    </tr>
                </tfoot>
            </table>
        </div>
    }
}

fn student_row(
    controller: &SessionController,
    student: &Student,
    weeks: &[Week],
    on_command: &Callback<SessionCommand>,
) -> Html {
    let is_viewer = controller.is_viewer();
    let symbol = controller.settings().currency_symbol.as_str();

    let on_pay_all = {
        let on_command = on_command.clone();
        let student_id = student.id;
        Callback::from(move |_: MouseEvent| {
            on_command.emit(SessionCommand::PayAllForStudent(student_id))
        })
    };

    html! {
        <tr key={student.id}>
            <td class="sticky-left">
                <EditableStudentName
                    student={student.clone()}
                    is_viewer={is_viewer}
                    on_command={on_command.clone()}
                />
            </td>
            {for weeks.iter().map(|week| {
                let week = *week;
                let paid = controller.amount(student.id, week);
                let status_class = controller.payment_status(student.id, week).css_class();

                if is_viewer {
                    html! {
                        <td>
                            <div class={classes!("payment-cell", status_class)}>
                                {format_cell_amount(paid, symbol)}
                            </div>
                        </td>
                    }
                } else {
                    let on_input = {
                        let on_command = on_command.clone();
                        let student_id = student.id;
                        Callback::from(move |e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            if let Some(amount) = parse_amount_input(&input.value()) {
                                on_command.emit(SessionCommand::SetPayment { student_id, week, amount });
                            }
                        })
                    };
                    html! {
                        <td>
                            <input
                                type="number"
                                min="0"
                                placeholder="0"
                                class={classes!("payment-input", status_class)}
                                value={if paid == 0 { String::new() } else { paid.to_string() }}
                                oninput={on_input}
                                aria-label={format!("Payment for {} week {}", student.name, week)}
                            />
                        </td>
                    }
                }
            })}
            <td class="sticky-right student-total">
                <span>{format_cell_amount(controller.student_total(student.id), symbol)}</span>
                {if is_viewer { html! {} } else {
                    html! {
                        <button
                            class="pay-all-btn"
                            title={format!("จ่ายครบสำหรับ {}", student.name)}
                            onclick={on_pay_all}
                        >{"฿✔"}</button>
                    }
                }}
            </td>
        </tr>
    }
}
