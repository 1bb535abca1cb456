//! Bundled demonstration source and the `main()` that exercises the
//! accessors generated from it.

use crate::context::EmitContext;

/// File name the sample is reported under.
pub const SAMPLE_NAME: &str = "<sample>";

/// A small C translation unit with one plain enum, one anonymous typedef
/// enum and one tagged typedef enum, mixed with comments and other code.
pub const SAMPLE_SOURCE: &str = r#"// stuff before
static const char *sample_banner = "enum NotAnEnum { x };";

enum Hello {
    Zero,
    One, /* a c style comment */
    Two,
    Three, // cpp style comment
    Five=/* embedded */ 5,
    Six,
    Ten=10,
    Large=10000,    // expected to be skipped
    };

// in the middle
typedef enum
    {
    alpha = 4,
    beta,
    gamma1
    = 10 ,
    zeta = 50
    } Blah;

typedef enum Kuku
    {
    single
    } Kiki;

// at the end
"#;

/// Append a `main()` printing the accessor result for present, missing and
/// out-of-range values of every sample enum.
pub fn emit_sample_main(out: &mut String, ctx: &EmitContext) {
    let hello = ctx.accessor_name("Hello");
    let blah = ctx.accessor_name("Blah");
    let kiki = ctx.accessor_name("Kiki");
    out.push_str(&format!(
        r#"
#include <stdio.h>
int main(int argc, char **argv)
{{
    enum Hello h1 = Zero, h2 = Five, h3 = 7, h4 = 11;
    Blah b1 = alpha, b2 = gamma1, b3 = -1, b4 = 17;
    Kiki k1 = single;
    printf("\n## Test enum str utility:\n\n");
    printf("# Hello - enum, no type\n");
    printf("h1 Zero %d - %s\n", h1, {hello}(h1));
    printf("h2 Five %d - %s\n", h2, {hello}(h2));
    printf("h3 (missing 7) %d - %s\n", h3, {hello}(h3));
    printf("h4 (out of range 11) %d - %s\n", h4, {hello}(h4));
    printf("# Blah - type enum, no enum name\n");
    printf("b1 alpha %d - %s\n", b1, {blah}(b1));
    printf("b2 gamma1 %d - %s\n", b2, {blah}(b2));
    printf("b3 (out of range -1) %d - %s\n", b3, {blah}(b3));
    printf("b4 (missing 17) %d - %s\n", b4, {blah}(b4));
    printf("# Kiki - type enum, enum name Kuku\n");
    printf("k1 single %d - %s\n", k1, {kiki}(k1));
    return 0;
}}
"#
    ));
}
