//! Message Bubble Component

use leptos::*;

use crate::state::{Message, Role};

/// One transcript entry: user messages on the right, replies on the left
#[component]
pub fn MessageBubble(message: Message) -> impl IntoView {
    let (row_class, bubble_class) = bubble_classes(message.role());

    view! {
        <div class=row_class>
            <div class=bubble_class>{message.content().to_string()}</div>
        </div>
    }
}

fn bubble_classes(role: Role) -> (&'static str, &'static str) {
    match role {
        Role::User => ("bubble-row right", "bubble user"),
        Role::Assistant => ("bubble-row left", "bubble assistant"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_by_role() {
        assert_eq!(bubble_classes(Role::User).0, "bubble-row right");
        assert_eq!(bubble_classes(Role::Assistant).0, "bubble-row left");
    }
}
