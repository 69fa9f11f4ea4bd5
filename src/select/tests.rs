use rstest::rstest;

use crate::{AsyncProps, AsyncSelectorResult, AsyncValue, TrackedUserInput};

type UserResult = AsyncSelectorResult<u32, (), &'static str, &'static str>;

fn tracked(user_id: u32) -> TrackedUserInput<u32, ()> {
    TrackedUserInput::builder(&user_id, &())
        .track(|s: &u32, _: &()| *s)
        .build()
}
fn result(value: AsyncValue<&'static str, &'static str>, user_id: u32) -> UserResult {
    AsyncSelectorResult::new(value, tracked(user_id))
}

#[rstest]
#[case(1)]
#[case(2)]
fn fresh_value_wins(#[case] user_id: u32) {
    let prev = result(AsyncValue::Received("old"), 1);
    let next = result(AsyncValue::Received("new"), user_id);
    let merged = next.merge_with_previous(prev, &user_id, &());
    assert_eq!(merged.async_value, AsyncValue::Received("new"));
}

#[test]
fn background_refresh_keeps_previous() {
    let prev = result(AsyncValue::Received("old"), 1);
    let next = result(AsyncValue::pending("refetch"), 1);
    let merged = next.merge_with_previous(prev, &1, &());
    assert_eq!(merged.async_value, AsyncValue::Received("old"));
}

#[test]
fn input_change_presents_unresolved_value() {
    let prev = result(AsyncValue::Received("old"), 1);
    let next = result(AsyncValue::none(), 2);
    let merged = next.merge_with_previous(prev, &2, &());
    assert_eq!(merged.async_value, AsyncValue::none());
}

#[test]
fn previous_tracked_input_is_compared() {
    let prev = result(AsyncValue::Received("old"), 1);
    let next = result(AsyncValue::none(), 2);
    let merged = next.merge_with_previous(prev, &1, &());
    assert_eq!(merged.async_value, AsyncValue::Received("old"));
}

#[test]
fn untracked_result_never_resets() {
    let prev: UserResult = AsyncSelectorResult::untracked(AsyncValue::Received("old"));
    let next: UserResult = AsyncSelectorResult::untracked(AsyncValue::none());
    let merged = next.merge_with_previous(prev, &5, &());
    assert_eq!(merged.value(), Some(&"old"));
}

#[test]
fn take_next_command() {
    let mut r = result(AsyncValue::Pending(vec!["a", "b"]), 1);
    assert_eq!(r.take_next_command(), Some("a"));
    assert_eq!(r.take_next_command(), Some("b"));
    assert_eq!(r.take_next_command(), None);
}
