pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::web;

use crate::auth::AuthMiddleware;

/// Routes mounted under the `/api` scope. Register and login stay open; the
/// task scope sits behind the bearer-token gate.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health::root)
        .service(auth::register)
        .service(auth::login)
        .service(
            web::scope("/tasks")
                .wrap(AuthMiddleware)
                .service(tasks::get_tasks)
                .service(tasks::create_task)
                .service(tasks::get_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        );
}
