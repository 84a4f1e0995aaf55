use log::LevelFilter;
use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::admin_panel::AdminPanel;
use components::header::Header;
use components::student_table::StudentTable;
use components::summary_dashboard::SummaryDashboard;
use hooks::use_session::use_session;

#[function_component(App)]
fn app() -> Html {
    let session = use_session();

    let Some(controller) = session.controller.clone() else {
        return html! {
            <div class="loading-screen">
                <div class="spinner"></div>
                <p>{"กำลังโหลดข้อมูล..."}</p>
            </div>
        };
    };

    let is_viewer = controller.is_viewer();

    html! {
        <>
            <Header is_viewer={is_viewer} />

            <main class="main">
                <div class="container">
                    <SummaryDashboard
                        summary={controller.summary()}
                        currency_symbol={controller.settings().currency_symbol.clone()}
                    />

                    {if is_viewer {
                        html! {
                            <div class="viewer-banner" role="alert">
                                <p class="viewer-banner-title">{"โหมดสำหรับดูเท่านั้น (Read-Only)"}</p>
                                <p>{"คุณกำลังดูข้อมูลในโหมดดูอย่างเดียว ไม่สามารถแก้ไขข้อมูลได้"}</p>
                            </div>
                        }
                    } else {
                        html! {
                            <AdminPanel
                                controller={controller.clone()}
                                on_command={session.on_command.clone()}
                            />
                        }
                    }}

                    <StudentTable
                        controller={controller.clone()}
                        on_command={session.on_command.clone()}
                    />
                </div>
            </main>

            <footer class="footer">
                <p>{"ระบบติดตามการชำระเงินค่าห้องเรียน"}</p>
            </footer>
        </>
    }
}

fn main() {
    services::logging::init(LevelFilter::Info);
    yew::Renderer::<App>::new().render();
}
