/// Turn a wheel platform tag into the display name used in the README.
///
/// - `linux_x86_64` → `Linux x86_64`
/// - `win_amd64` → `Windows x86_64`
pub fn normalize_platform_name(raw: &str) -> String {
    let mut chars = raw.chars();
    let mut name = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => return String::new(),
    };

    name = name.replacen('_', " ", 1);
    if name.contains("Win") && !name.contains("Windows") {
        name = name.replace("Win", "Windows");
    }
    if name.contains("amd64") {
        name = name.replace("amd64", "x86_64");
    }
    name
}
