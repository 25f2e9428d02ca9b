use std::path::Path;
use std::sync::{Arc, RwLock};

use actix_web::middleware::Logger;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, put, web};

use serde::Deserialize;
use rs_textgen_core::Generator;
use rs_textgen_core::io::{list_files, model_name};

/// Directory holding the `.bin` models.
const DATA_DIR: &str = "./data";
const MODEL_EXTENSION: &str = "bin";
/// Longest text a single request may ask for, in characters.
const MAX_LENGTH: usize = 100_000;

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	length: Option<usize>,
	seed: Option<String>,
}

#[derive(Deserialize)]
struct ModelQuery {
	name: Option<String>,
}

/// Loaded model and its name.
///
/// The generator is immutable once loaded, so requests clone the `Arc` and
/// generate without holding the lock.
#[derive(Default)]
struct SharedData {
	model: Option<(String, Arc<Generator>)>,
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates sentences from the loaded model, one per line.
///
/// Lengths above [`MAX_LENGTH`] are rejected; generation runs on the
/// blocking thread pool.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<RwLock<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let length = query.length.unwrap_or(100);
	if length > MAX_LENGTH {
		return HttpResponse::BadRequest().body(format!("Length must not exceed {MAX_LENGTH}"));
	}

	let generator = match data.read() {
		Ok(shared_data) => match &shared_data.model {
			Some((_, generator)) => Arc::clone(generator),
			None => return HttpResponse::BadRequest().body("No model loaded"),
		},
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let seed = query.into_inner().seed;
	match web::block(move || generator.generate(length, seed.as_deref())).await {
		Ok(Ok(generated)) => {
			for warning in &generated.warnings {
				log::warn!("{warning}");
			}
			HttpResponse::Ok().body(generated.sentences.join("\n"))
		}
		Ok(Err(e)) => HttpResponse::InternalServerError().body(e.to_string()),
		Err(_) => HttpResponse::InternalServerError().body("Generation was interrupted"),
	}
}

#[get("/v1/models")]
async fn get_models() -> impl Responder {
	match list_files(DATA_DIR, MODEL_EXTENSION) {
		Ok(files) => {
			let names: Vec<String> = files.iter().filter_map(|f| model_name(f).ok()).collect();
			HttpResponse::Ok().body(names.join("\n"))
		}
		Err(_) => HttpResponse::InternalServerError().body("Failed to list models"),
	}
}

/// HTTP GET endpoint `/v1/loaded_model`
///
/// Reports the loaded model as `name (order N, W words)`, or nothing.
#[get("/v1/loaded_model")]
async fn get_loaded_model(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	match &shared_data.model {
		Some((name, generator)) => HttpResponse::Ok().body(format!(
			"{name} (order {}, {} words)",
			generator.order(),
			generator.lexicon().len()
		)),
		None => HttpResponse::Ok().body(""),
	}
}

#[put("/v1/load_model")]
async fn put_model(data: web::Data<RwLock<SharedData>>, query: web::Query<ModelQuery>) -> impl Responder {
	let name = match &query.name {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty model name"),
	};
	if name.contains(['/', '\\']) || name.starts_with('.') {
		return HttpResponse::BadRequest().body("Invalid model name");
	}

	let model_path = Path::new(DATA_DIR).join(format!("{name}.{MODEL_EXTENSION}"));
	let generator = match web::block(move || Generator::load(model_path)).await {
		Ok(Ok(generator)) => generator,
		Ok(Err(e)) if e.is_not_found() => return HttpResponse::NotFound().body(format!("No model named '{name}'")),
		Ok(Err(e)) => return HttpResponse::InternalServerError().body(format!("Failed to load model: {e}")),
		Err(_) => return HttpResponse::InternalServerError().body("Model loading was interrupted"),
	};

	let mut shared_data = match data.write() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	shared_data.model = Some((name.to_owned(), Arc::new(generator)));
	log::info!("model '{name}' loaded");

	HttpResponse::Ok().body("Model loaded successfully")
}

/// Main entry point for the server.
///
/// Starts without a model; `PUT /v1/load_model` selects one from `./data`.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let shared_model = web::Data::new(RwLock::new(SharedData::default()));

	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.app_data(shared_model.clone())
			.service(get_generated)
			.service(get_models)
			.service(put_model)
			.service(get_loaded_model)
	})
	.bind(("127.0.0.1", 5000))?
	.run()
	.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::http::StatusCode;
	use actix_web::test;
	use rs_textgen_core::model::tokenizer::Alphabet;
	use rs_textgen_core::{Config, Trainer};

	fn loaded(name: &str, lines: &[&str]) -> web::Data<RwLock<SharedData>> {
		let mut trainer = Trainer::new(&Config { order: 2, alphabet: Alphabet::Latin, lowercase: false }).unwrap();
		for line in lines {
			trainer.train(line);
		}
		let generator = Generator::from_artifact(trainer.into_artifact()).unwrap();
		web::Data::new(RwLock::new(SharedData { model: Some((name.to_owned(), Arc::new(generator))) }))
	}

	#[actix_web::test]
	async fn generate_without_model_is_a_bad_request() {
		let data = web::Data::new(RwLock::new(SharedData::default()));
		let app = test::init_service(App::new().app_data(data).service(get_generated)).await;
		let request = test::TestRequest::get().uri("/v1/generate?length=10").to_request();
		let response = test::call_service(&app, request).await;
		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn loading_rejects_bad_and_unknown_names() {
		let data = web::Data::new(RwLock::new(SharedData::default()));
		let app = test::init_service(App::new().app_data(data).service(put_model)).await;

		let request = test::TestRequest::put().uri("/v1/load_model?name=../secret").to_request();
		assert_eq!(test::call_service(&app, request).await.status(), StatusCode::BAD_REQUEST);

		let request = test::TestRequest::put().uri("/v1/load_model?name=no_such_model").to_request();
		assert_eq!(test::call_service(&app, request).await.status(), StatusCode::NOT_FOUND);
	}

	#[actix_web::test]
	async fn generation_length_is_capped() {
		let data = loaded("cat", &["the cat sat"]);
		let app = test::init_service(App::new().app_data(data).service(get_generated)).await;

		let uri = format!("/v1/generate?length={}", MAX_LENGTH + 1);
		let request = test::TestRequest::get().uri(&uri).to_request();
		assert_eq!(test::call_service(&app, request).await.status(), StatusCode::BAD_REQUEST);

		let request = test::TestRequest::get().uri("/v1/generate?length=10&seed=the").to_request();
		let body = test::call_and_read_body(&app, request).await;
		assert!(body.starts_with(b"The cat"));
	}

	#[actix_web::test]
	async fn loaded_model_reports_order_and_lexicon_size() {
		let data = loaded("cat", &["the cat sat"]);
		let app = test::init_service(App::new().app_data(data).service(get_loaded_model)).await;
		let request = test::TestRequest::get().uri("/v1/loaded_model").to_request();
		let body = test::call_and_read_body(&app, request).await;
		assert_eq!(body, "cat (order 2, 3 words)");
	}
}
