//! Members signup forms.

use std::rc::Rc;

use crate::dom::{Dom, DomEvent, EventKind, EventTarget};

const MEMBERS_FORMS: &str = "[data-members-form]";
const SUBMIT_BUTTON: &str = r#"button[type="submit"]"#;
const BUTTON_TEXT: &str = ".btn-text";
const BUTTON_LOADING: &str = ".btn-loading";

/// Loading state for members signup forms. The form still submits itself;
/// this only swaps the button label and blocks double submits.
pub struct NewsletterForm;

impl NewsletterForm {
    /// Attach a submit listener to every members form; returns how many.
    pub fn init<D: Dom>(dom: &Rc<D>) -> usize {
        let forms = dom.query_all(MEMBERS_FORMS);
        for form in &forms {
            let dom_ref = dom.clone();
            let form_ref = form.clone();
            dom.listen(
                EventTarget::Node(form.clone()),
                EventKind::Submit,
                Box::new(move |_: &DomEvent<D::Node>| show_loading(dom_ref.as_ref(), &form_ref)),
            );
        }
        forms.len()
    }
}

fn show_loading<D: Dom>(dom: &D, form: &D::Node) {
    let Some(button) = dom.query_in(form, SUBMIT_BUTTON) else {
        return;
    };
    if let (Some(text), Some(loading)) =
        (dom.query_in(&button, BUTTON_TEXT), dom.query_in(&button, BUTTON_LOADING))
    {
        dom.set_style(&text, "display", "none");
        dom.set_style(&loading, "display", "inline");
    }
    dom.set_disabled(&button, true);
}
