use leptos::prelude::*;
use leptos::task::spawn_local;
use log::error;

use crate::components::description::DescriptionList;
use crate::components::topology::{TopologyCanvas, TopologyGraph};
use crate::services::{self, OPENROUTER_MODELS, Provider, RequestConfig};

const EXAMPLE_DESCRIPTION: &str = "\
An edge router, R1, connects to the internet cloud.
This router also connects to a core switch, SW-Core.
SW-Core is connected to two distribution switches: Dist-SW1 and Dist-SW2.
Dist-SW1 connects to a firewall, FW1, which in turn protects a web server, WebSrv-01.
Dist-SW2 connects to two access switches: Acc-SW1 and Acc-SW2.
Acc-SW1 connects to PC-Alice and PC-Bob.
Acc-SW2 connects to PC-Charlie.";

/// Main page: description input, provider settings, and the topology view.
#[component]
pub fn Home() -> impl IntoView {
	let (description, set_description) = signal(EXAMPLE_DESCRIPTION.to_string());
	let (provider, set_provider) = signal(Provider::Gemini);
	let (api_key, set_api_key) = signal(String::new());
	let (model, set_model) = signal(OPENROUTER_MODELS[0].to_string());
	let (busy, set_busy) = signal(false);
	let (error_message, set_error_message) = signal(None::<String>);
	let (summary, set_summary) = signal(String::new());
	let (graph, set_graph) = signal(None::<TopologyGraph>);

	let generate = move |_| {
		if busy.get_untracked() {
			return;
		}
		let text = description.get_untracked();
		if text.trim().is_empty() {
			set_error_message.set(Some("Please enter a network description.".into()));
			return;
		}
		let api_key = api_key.get_untracked();
		if api_key.trim().is_empty() {
			set_error_message.set(Some(format!(
				"Please enter a {} API key.",
				provider.get_untracked().label()
			)));
			return;
		}
		let config = RequestConfig {
			provider: provider.get_untracked(),
			api_key,
			model: model.get_untracked(),
		};
		set_busy.set(true);
		set_error_message.set(None);
		spawn_local(async move {
			match services::generate_topology(&config, &text).await {
				Ok(response) => {
					set_summary.set(response.description);
					set_graph.set(Some(TopologyGraph::from_payload(&response.graph)));
				}
				Err(err) => {
					error!("topology generation failed: {err}");
					set_summary.set(String::new());
					set_graph.set(None);
					set_error_message.set(Some(err.to_string()));
				}
			}
			set_busy.set(false);
		});
	};

	view! {
		<div class="app-layout">
			<aside class="control-panel">
				<header>
					<h1>"AI Network Visualizer"</h1>
					<p class="subtitle">
						"Describe a network in plain language and get an interactive diagram."
					</p>
				</header>

				<div class="field">
					<label>"Provider"</label>
					<div class="provider-buttons">
						<button
							class:active=move || provider.get() == Provider::Gemini
							on:click=move |_| set_provider.set(Provider::Gemini)
						>
							"Gemini"
						</button>
						<button
							class:active=move || provider.get() == Provider::OpenRouter
							on:click=move |_| set_provider.set(Provider::OpenRouter)
						>
							"OpenRouter"
						</button>
					</div>
				</div>

				<div class="field">
					<label for="api-key">"API Key"</label>
					<input
						id="api-key"
						type="password"
						prop:value=api_key
						placeholder=move || format!("Enter your {} API key", provider.get().label())
						on:input=move |ev| set_api_key.set(event_target_value(&ev))
					/>
				</div>

				{move || {
					(provider.get() == Provider::OpenRouter)
						.then(|| {
							view! {
								<div class="field">
									<label for="model">"Model"</label>
									<select
										id="model"
										prop:value=model
										on:change=move |ev| set_model.set(event_target_value(&ev))
									>
										{OPENROUTER_MODELS
											.iter()
											.map(|name| view! { <option value=*name>{*name}</option> })
											.collect_view()}
									</select>
								</div>
							}
						})
				}}

				<div class="field grow">
					<label for="description">"Network Description"</label>
					<textarea
						id="description"
						prop:value=description
						placeholder="e.g., A router R1 is connected to a switch SW1..."
						disabled=busy
						on:input=move |ev| set_description.set(event_target_value(&ev))
					/>
				</div>

				<button class="generate" disabled=busy on:click=generate>
					{move || if busy.get() { "Generating..." } else { "Generate Topology" }}
				</button>

				{move || {
					error_message
						.get()
						.map(|message| {
							view! {
								<div class="error-banner">
									<p class="error-title">"Error"</p>
									<p>{message}</p>
								</div>
							}
						})
				}}

				{move || {
					(!summary.get().is_empty()).then(|| view! { <DescriptionList text=summary /> })
				}}
			</aside>

			<main class="viewport">
				<TopologyCanvas graph=graph />
				{move || {
					graph
						.get()
						.is_none()
						.then(|| {
							view! {
								<div class="placeholder">
									<h2>"Visualization Area"</h2>
									<p>"Your network graph will appear here."</p>
								</div>
							}
						})
				}}
			</main>
		</div>
	}
}
