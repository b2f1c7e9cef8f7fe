/// 以英文連接詞串接清單：`a`、`a and b`、`a, b, and c`
pub fn join_and<T, F>(items: &[T], mapper: F) -> String
where
    F: Fn(&T) -> String,
{
    let mapped: Vec<String> = items.iter().map(mapper).collect();
    match mapped.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{} and {}", first, second),
        [head @ .., last] => format!("{}, and {}", head.join(", "), last),
    }
}
