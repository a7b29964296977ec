use leptos::prelude::*;

use crate::components::services::{EnvVar, Service, ServiceStatus, ServicesPanel};

fn logs(lines: &[&str]) -> Vec<String> {
	lines.iter().map(|line| line.to_string()).collect()
}

/// Services known to the dashboard on first load.
pub fn seed_services() -> Vec<Service> {
	vec![
		Service {
			id: "1".into(),
			name: "User Microapplication".into(),
			version: "1.0.2".into(),
			runtime: "SpringBoot".into(),
			db: Some("users_db".into()),
			status: ServiceStatus::Active,
			last_updated: "2025-01-08".into(),
			env_vars: vec![
				EnvVar::new("SERVER_PORT", "8080"),
				EnvVar::new("DB_HOST", "localhost"),
				EnvVar::new("DB_NAME", "users_db"),
				EnvVar::new("LOG_LEVEL", "INFO"),
			],
			logs: logs(&[
				"[INFO] 2025-01-08 10:00:00 Starting Spring Boot application...",
				"[INFO] 2025-01-08 10:00:05 Connected to users_db",
				"[INFO] 2025-01-08 10:00:06 Tomcat initialized with port(s): 8080 (http)",
				"[INFO] 2025-01-08 10:15:23 User login attempt: user_123",
				"[INFO] 2025-01-08 10:15:24 User login successful",
			]),
		},
		Service {
			id: "2".into(),
			name: "Order Microapplication".into(),
			version: "2.1.0".into(),
			runtime: "NodeJS".into(),
			db: Some("orders_db".into()),
			status: ServiceStatus::Active,
			last_updated: "2025-01-07".into(),
			env_vars: vec![
				EnvVar::new("PORT", "3000"),
				EnvVar::new("DB_URI", "mongodb://localhost:27017/orders_db"),
				EnvVar::new("REDIS_HOST", "localhost"),
				EnvVar::new("NODE_ENV", "production"),
			],
			logs: logs(&[
				"[INFO] 2025-01-07 14:00:00 Service started",
				"[INFO] 2025-01-07 14:00:01 Connected to MongoDB",
				"[INFO] 2025-01-07 14:05:00 Received new order #ORD-2025-001",
				"[INFO] 2025-01-07 14:05:01 Order processed successfully",
			]),
		},
		Service {
			id: "3".into(),
			name: "Payment Microapplication".into(),
			version: "1.0.5".into(),
			runtime: "Go".into(),
			db: None,
			status: ServiceStatus::Inactive,
			last_updated: "2024-12-20".into(),
			env_vars: vec![
				EnvVar::new("HTTP_PORT", "8081"),
				EnvVar::new("STRIPE_KEY", "sk_test_..."),
				EnvVar::new("CURRENCY", "USD"),
			],
			logs: logs(&["[INFO] 2024-12-20 09:00:00 Service stopped"]),
		},
		Service {
			id: "4".into(),
			name: "Notification Microapplication".into(),
			version: "0.9.0".into(),
			runtime: "Python".into(),
			db: Some("redis_cache".into()),
			status: ServiceStatus::Active,
			last_updated: "2025-01-08".into(),
			env_vars: vec![
				EnvVar::new("FLASK_APP", "app.py"),
				EnvVar::new("FLASK_ENV", "production"),
				EnvVar::new("REDIS_URL", "redis://localhost:6379/0"),
				EnvVar::new("SMTP_SERVER", "smtp.example.com"),
			],
			logs: logs(&[
				"[INFO] 2025-01-08 11:00:00 Worker started",
				"[INFO] 2025-01-08 11:05:00 Sending email to user@example.com",
				"[INFO] 2025-01-08 11:05:02 Email sent successfully",
			]),
		},
	]
}

/// Microapplication management
#[component]
pub fn ServicesPage() -> impl IntoView {
	view! { <ServicesPanel services=seed_services() /> }
}
