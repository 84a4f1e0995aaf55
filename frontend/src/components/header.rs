use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub is_viewer: bool,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    html! {
        <header class="header">
            <div class="container">
                <h1>{"ระบบติดตามเงินค่าห้อง"}</h1>
                {if props.is_viewer {
                    html! { <span class="mode-badge">{"Read-Only"}</span> }
                } else { html! {} }}
            </div>
        </header>
    }
}
