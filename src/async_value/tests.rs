use crate::AsyncValue;

#[test]
fn received_has_no_commands() {
    let value: AsyncValue<&str, i32> = AsyncValue::Received(10);
    assert!(value.is_received());
    assert!(value.commands().is_empty());
    assert_eq!(value.value(), Some(&10));
}

#[test]
fn take_next_command_in_order() {
    let mut value: AsyncValue<&str, i32> = AsyncValue::Pending(vec!["a", "b"]);
    assert_eq!(value.take_next_command(), Some("a"));
    assert_eq!(value.take_next_command(), Some("b"));
    assert_eq!(value.take_next_command(), None);
    assert_eq!(value, AsyncValue::none());
}

#[test]
fn take_next_command_from_received() {
    let mut value: AsyncValue<&str, i32> = AsyncValue::Received(1);
    assert_eq!(value.take_next_command(), None);
    assert_eq!(value, AsyncValue::Received(1));
}

#[test]
fn map_keeps_commands() {
    let value: AsyncValue<&str, i32> = AsyncValue::pending("fetch");
    assert_eq!(value.map(|x| x * 2), AsyncValue::Pending(vec!["fetch"]));

    let value: AsyncValue<&str, i32> = AsyncValue::Received(2);
    assert_eq!(value.map(|x| x * 2), AsyncValue::Received(4));
}

#[test]
fn map_commands() {
    let value: AsyncValue<&str, i32> = AsyncValue::Pending(vec!["a", "bc"]);
    assert_eq!(
        value.map_commands(str::len),
        AsyncValue::Pending(vec![1, 2])
    );
}
