//! Shared page layout, styles and formatting helpers.

use maud::{DOCTYPE, Markup, html};

// Card styles
pub const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md";

// Form styles
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";

// Page container
pub const PAGE_CONTAINER_STYLE: &str = "flex flex-col items-center px-2 lg:px-6 lg:py-8 \
    mx-auto max-w-screen-xl text-gray-900 dark:text-white";

/// Extra elements for a page's `<head>`.
pub enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
}

pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Pizza Sales" }
                link href="/static/main.css" rel="stylesheet";

                script src="/static/htmx-2.0.8-min.js" {}

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptLink(path) => script src=(path) {}
                    }
                }
            }

            body class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-blue-600
                            hover:bg-blue-800 focus:ring-4 focus:outline-hidden
                            focus:ring-blue-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-blue-900 my-4"
                    {
                        "Back to Dashboard"
                    }
                }
            }
        }
    );

    base(title, &[], &content)
}

/// Format `number` as dollars with two decimal places, e.g. "$1,234.50".
///
/// Cents are rounded, not truncated. NaN and infinite values are shown as
/// "$0.00".
pub fn format_currency(number: f64) -> String {
    if !number.is_finite() {
        return "$0.00".to_owned();
    }

    let fixed = format!("{:.2}", number.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // Amounts that round to zero cents are not negative.
    let sign = if number < 0.0 && fixed != "0.00" { "-" } else { "" };

    format!("{sign}${grouped}.{cents}")
}

#[cfg(test)]
mod tests {
    use super::format_currency;

    #[test]
    fn formats_dollars_with_two_decimals() {
        assert_eq!(format_currency(20.0), "$20.00");
        assert_eq!(format_currency(12.3), "$12.30");
        assert_eq!(format_currency(-7.25), "-$7.25");
    }

    #[test]
    fn rounds_to_nearest_cent() {
        assert_eq!(format_currency(45.678), "$45.68");
        assert_eq!(format_currency(10.10 + 20.20), "$30.30");
        assert_eq!(format_currency(0.001), "$0.00");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn groups_thousands_without_exponent() {
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(1e15), "$1,000,000,000,000,000.00");
        assert_eq!(format_currency(-1234567.0), "-$1,234,567.00");
    }

    #[test]
    fn formats_zero_and_non_finite_as_zero() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(f64::NAN), "$0.00");
        assert_eq!(format_currency(f64::INFINITY), "$0.00");
    }
}
