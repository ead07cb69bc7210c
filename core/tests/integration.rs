//! Full lifecycle test of the build/parse layer against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every `build_*`
//! and `parse_*` pair over real HTTP using ureq as the executor.

use blog_core::{
    ApiError, AuthApi, CreateCommentRequest, CreatePostRequest, HttpMethod, HttpRequest,
    HttpResponse, LoginRequest, PostApi, RegisterRequest,
};

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match req.method {
        HttpMethod::Get => with_headers(agent.get(&req.path), &req.headers).call(),
        HttpMethod::Delete => with_headers(agent.delete(&req.path), &req.headers).call(),
        HttpMethod::Post => {
            let builder = with_headers(agent.post(&req.path), &req.headers);
            match req.body {
                Some(body) => builder.send(body.as_bytes()),
                None => builder.send_empty(),
            }
        }
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn blog_lifecycle() {
    let base_url = start_server();
    let auth = AuthApi::new(&base_url);
    let posts = PostApi::new(&base_url);

    // Step 1: register and log in.
    let registration = RegisterRequest {
        email: "alice@example.com".to_string(),
        password: "123456".to_string(),
        username: "alice".to_string(),
    };
    let req = auth.build_register(&registration).unwrap();
    let user = auth.parse_register(execute(req)).unwrap();
    assert_eq!(user.username, "alice");

    let credentials = LoginRequest {
        email: "alice@example.com".to_string(),
        password: "123456".to_string(),
    };
    let req = auth.build_login(&credentials).unwrap();
    let logged_in = auth.parse_login(execute(req)).unwrap();
    assert_eq!(logged_in, user);

    // Step 2: wrong password is a 401 with the raw body kept.
    let wrong = LoginRequest {
        password: "nope".to_string(),
        ..credentials
    };
    let req = auth.build_login(&wrong).unwrap();
    let err = auth.parse_login(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::HttpError { status: 401, ref body } if body.contains("invalid credentials")));

    // Step 3: list is empty, then create a post.
    let listed = posts.parse_get_all_posts(execute(posts.build_get_all_posts())).unwrap();
    assert!(listed.is_empty(), "expected empty list");

    let input = CreatePostRequest {
        title: "New Post".to_string(),
        content: "New Content".to_string(),
    };
    let req = posts.build_create_post(&input, user.id).unwrap();
    let created = posts.parse_create_post(execute(req)).unwrap();
    assert_eq!(created.title, "New Post");
    assert_eq!(created.user_id, user.id);

    let fetched = posts
        .parse_get_post_by_id(execute(posts.build_get_post_by_id(created.id)))
        .unwrap();
    assert_eq!(fetched, created);

    // Step 4: comment, list, delete the comment.
    let comment_input = CreateCommentRequest {
        content: "Great post!".to_string(),
    };
    let req = posts.build_create_comment(created.id, &comment_input, user.id).unwrap();
    let comment = posts.parse_create_comment(execute(req)).unwrap();
    assert_eq!(comment.post_id, created.id);

    let comments = posts
        .parse_get_comments(execute(posts.build_get_comments(created.id)))
        .unwrap();
    assert_eq!(comments, vec![comment.clone()]);

    let req = posts.build_delete_comment(created.id, comment.id, user.id);
    posts.parse_delete_comment(execute(req)).unwrap();

    // Step 5: deleting as another user is forbidden.
    let req = posts.build_delete_post(created.id, user.id + 1);
    let err = posts.parse_delete_post(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::HttpError { status: 403, .. }));

    // Step 6: delete as the author, then the post is gone.
    let req = posts.build_delete_post(created.id, user.id);
    posts.parse_delete_post(execute(req)).unwrap();

    let err = posts
        .parse_get_post_by_id(execute(posts.build_get_post_by_id(created.id)))
        .unwrap_err();
    assert!(matches!(err, ApiError::HttpError { status: 404, .. }));
}
