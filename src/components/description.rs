//! Bullet-list rendering of the provider's free-text summary.

use leptos::prelude::*;

/// Splits the summary on newlines, strips one leading `*`/`-` bullet per
/// line, and drops empty lines. Providers vary in how they format bullets;
/// this normalizes all of them to plain items.
pub fn bullet_lines(text: &str) -> Vec<String> {
	text.lines()
		.map(|line| {
			let line = line.trim();
			line.strip_prefix(['*', '-'])
				.unwrap_or(line)
				.trim_start()
				.to_string()
		})
		.filter(|line| !line.is_empty())
		.collect()
}

/// The "Proposed Topology" summary panel.
#[component]
pub fn DescriptionList(#[prop(into)] text: Signal<String>) -> impl IntoView {
	view! {
		<div class="description-panel">
			<h3>"Proposed Topology"</h3>
			<ul>
				{move || {
					bullet_lines(&text.get())
						.into_iter()
						.map(|line| view! { <li>{line}</li> })
						.collect_view()
				}}
			</ul>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::bullet_lines;

	#[test]
	fn strips_bullets_and_blank_lines() {
		let text = "* Two routers linked over a /30.\n\n- One LAN with 3 PCs.\n   \nPlain line.";
		assert_eq!(bullet_lines(text), vec![
			"Two routers linked over a /30.",
			"One LAN with 3 PCs.",
			"Plain line.",
		]);
	}

	#[test]
	fn only_one_bullet_character_is_stripped() {
		assert_eq!(bullet_lines("-- dashed"), vec!["- dashed"]);
		assert_eq!(bullet_lines("*bold* start"), vec!["bold* start"]);
	}

	#[test]
	fn empty_input_yields_no_items() {
		assert!(bullet_lines("").is_empty());
		assert!(bullet_lines("\n \n*\n").is_empty());
	}
}
