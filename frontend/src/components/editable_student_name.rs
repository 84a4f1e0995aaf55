use shared::{SessionCommand, Student};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct EditableStudentNameProps {
    pub student: Student,
    pub is_viewer: bool,
    pub on_command: Callback<SessionCommand>,
}

/// Student name cell that turns into a text input on click.
///
/// The edit commits on blur or Enter. A blank edit reverts to the stored name.
#[function_component(EditableStudentName)]
pub fn editable_student_name(props: &EditableStudentNameProps) -> Html {
    let is_editing = use_state(|| false);
    let draft = use_state(|| props.student.name.clone());
    let input_ref = use_node_ref();

    // Keep the draft in sync when the stored name changes
    use_effect_with(props.student.name.clone(), {
        let draft = draft.clone();
        move |name| {
            draft.set(name.clone());
            || ()
        }
    });

    use_effect_with(*is_editing, {
        let input_ref = input_ref.clone();
        move |editing| {
            if *editing {
                if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                    let _ = input.focus();
                    input.select();
                }
            }
            || ()
        }
    });

    if props.is_viewer {
        return html! { <span class="student-name">{&props.student.name}</span> };
    }

    if *is_editing {
        let on_input = {
            let draft = draft.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                draft.set(input.value());
            })
        };

        let on_blur = {
            let is_editing = is_editing.clone();
            let draft = draft.clone();
            let student = props.student.clone();
            let on_command = props.on_command.clone();
            Callback::from(move |_: FocusEvent| {
                is_editing.set(false);
                if draft.trim().is_empty() {
                    draft.set(student.name.clone());
                } else if *draft != student.name {
                    on_command.emit(SessionCommand::RenameStudent {
                        student_id: student.id,
                        name: (*draft).clone(),
                    });
                }
            })
        };

        let on_keydown = {
            let input_ref = input_ref.clone();
            Callback::from(move |e: KeyboardEvent| {
                if e.key() == "Enter" {
                    if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                        let _ = input.blur();
                    }
                }
            })
        };

        return html! {
            <input
                ref={input_ref}
                type="text"
                class="student-name-input"
                value={(*draft).clone()}
                oninput={on_input}
                onblur={on_blur}
                onkeydown={on_keydown}
            />
        };
    }

    let on_click = {
        let is_editing = is_editing.clone();
        Callback::from(move |_: MouseEvent| is_editing.set(true))
    };

    html! {
        <button class="student-name-button" onclick={on_click}>
            <span class="student-name">{&props.student.name}</span>
            <span class="edit-icon">{"✎"}</span>
        </button>
    }
}
