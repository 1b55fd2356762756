// Page-side scripts. Each accepts its arguments either as one record or as a
// positional list, so both calling conventions hit the same code.

/// `{xpath}` | `[xpath]` → `{x, y, width, height}` or `null`.
pub const ELEMENT_BOUNDS: &str = r#"(...args) => {
    const p = (args.length === 1 && args[0] !== null && typeof args[0] === 'object')
        ? args[0]
        : { xpath: args[0] };
    const element = document.evaluate(
        p.xpath,
        document,
        null,
        XPathResult.FIRST_ORDERED_NODE_TYPE,
        null
    ).singleNodeValue;
    if (!element) return null;
    const rect = element.getBoundingClientRect();
    return { x: rect.left, y: rect.top, width: rect.width, height: rect.height };
}"#;

/// No arguments → `{x, y}` screen origin of the window.
pub const WINDOW_ORIGIN: &str = r#"() => {
    return {
        x: window.screenX || window.screenLeft || 0,
        y: window.screenY || window.screenTop || 0
    };
}"#;

/// `{xpath, x, y}` | `[xpath, x, y]` → `{found, hit, owned}`.
///
/// `found`: the xpath resolved. `hit`: something is rendered at (x, y).
/// `owned`: the target is the hit element or one of its ancestors.
pub const ELEMENT_AT_POINT: &str = r#"(...args) => {
    const p = (args.length === 1 && args[0] !== null && typeof args[0] === 'object')
        ? args[0]
        : { xpath: args[0], x: args[1], y: args[2] };
    const target = document.evaluate(
        p.xpath,
        document,
        null,
        XPathResult.FIRST_ORDERED_NODE_TYPE,
        null
    ).singleNodeValue;
    if (!target) return { found: false, hit: false, owned: false };
    const hit = document.elementFromPoint(p.x, p.y);
    if (!hit) return { found: true, hit: false, owned: false };
    for (let node = hit; node; node = node.parentElement) {
        if (node === target) return { found: true, hit: true, owned: true };
    }
    return { found: true, hit: true, owned: false };
}"#;
