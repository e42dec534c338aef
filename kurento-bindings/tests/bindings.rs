//! Drives the generated bindings against a scripted in-process media server.

use kurento_bindings::kurento::*;
use kurento_client::{
    ChannelTransport, ClientError, Connection, ConnectionBuilder, IMediaObject, ParamValue,
    Params, Request, Response, RpcError, ServerClient, create,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

fn client() -> (ServerClient, mpsc::UnboundedReceiver<Request>) {
    let (transport, rx) = ChannelTransport::new();
    (ConnectionBuilder::new(Arc::new(transport)).build_client(), rx)
}

fn connection(client: &ServerClient) -> Arc<Connection> {
    Arc::clone(client.object().connection().expect("connection"))
}

/// Replies the way a media server would for the operations used below.
fn reply(request: &Request) -> Response {
    if request.method == "create" {
        let object_type = request.params["type"].as_str().unwrap_or_default();
        return Response::with_value(request.id, format!("{object_type}-{}", request.id));
    }
    match request.params["operation"].as_str() {
        Some("generateOffer") => Response::with_value(request.id, "v=0 offer"),
        Some("processAnswer") => Response::with_value(request.id, "v=0 answer"),
        Some("getGstreamerDot") => Response::with_value(request.id, "digraph pipeline {}"),
        Some("getSourceConnections") => {
            Response::with_value(request.id, json!([{"sourceDescription": "cam"}]))
        }
        Some("getVideoInfo") => {
            Response::with_value(request.id, json!({"isSeekable": true, "duration": 10}))
        }
        _ => Response::success(request.id, Params::new()),
    }
}

fn reject(request: &Request) -> Response {
    Response::failure(
        request.id,
        RpcError {
            code: 40101,
            message: "Object not found".into(),
            data: None,
        },
    )
}

/// Answers `count` requests with `script`, returning them in arrival order.
fn serve(
    client: &ServerClient,
    mut rx: mpsc::UnboundedReceiver<Request>,
    count: usize,
    script: fn(&Request) -> Response,
) -> JoinHandle<Vec<Request>> {
    let connection = connection(client);
    tokio::spawn(async move {
        let mut requests = Vec::with_capacity(count);
        for _ in 0..count {
            let request = rx.recv().await.expect("request");
            assert!(connection.dispatch(script(&request)));
            requests.push(request);
        }
        requests
    })
}

fn attached<T: IMediaObject + Default>(client: &ServerClient, id: &str) -> T {
    let mut object = T::default();
    object.object_mut().attach(connection(client), id);
    object
}

#[tokio::test]
async fn test_create_pipeline_and_endpoint() {
    let (client, rx) = client();
    let server = serve(&client, rx, 2, reply);

    let mut pipeline = MediaPipeline::default();
    create(&client, &mut pipeline, Params::new())
        .await
        .expect("create pipeline");

    let mut endpoint = WebRtcEndpoint::default();
    let mut options = Params::new();
    options.insert("test".into(), json!("val"));
    create(&pipeline, &mut endpoint, options)
        .await
        .expect("create endpoint");

    let requests = server.await.expect("server");
    assert_eq!(
        requests[0].params,
        json!({"type": "MediaPipeline", "constructorParameters": {}})
    );
    assert_eq!(
        requests[1].params,
        json!({
            "type": "WebRtcEndpoint",
            "constructorParameters": {
                "mediaPipeline": "MediaPipeline-1",
                "recvonly": false,
                "useDataChannels": true,
                "stunServerPort": 3478,
                "test": "val"
            }
        })
    );
    assert_eq!(pipeline.handle(), "MediaPipeline-1");
    assert_eq!(endpoint.handle(), "WebRtcEndpoint-2");
}

#[test]
fn test_options_override_computed_params() {
    let (client, _rx) = client();
    let pipeline: MediaPipeline = attached(&client, "pipe-1");
    let endpoint = WebRtcEndpoint::default();

    let mut options = Params::new();
    options.insert("recvonly".into(), json!(true));
    let params = endpoint.constructor_params(&pipeline, options);

    assert_eq!(params["recvonly"], json!(true));
    assert_eq!(params["mediaPipeline"], json!("pipe-1"));
}

#[test]
fn test_pipeline_passes_options_through() {
    let (client, _rx) = client();
    let mut options = Params::new();
    options.insert("test".into(), json!("val"));

    let params = MediaPipeline::default().constructor_params(&client, options.clone());
    assert_eq!(params, options);
}

#[tokio::test]
async fn test_inherited_operation_targets_own_handle() {
    let (client, rx) = client();
    let server = serve(&client, rx, 2, reply);
    let endpoint: WebRtcEndpoint = attached(&client, "ep-1");

    assert_eq!(endpoint.generate_offer().await.expect("offer"), "v=0 offer");
    assert_eq!(
        endpoint.process_answer("v=0").await.expect("answer"),
        "v=0 answer"
    );

    let requests = server.await.expect("server");
    assert_eq!(
        requests[0].params,
        json!({"object": "ep-1", "operation": "generateOffer"})
    );
    assert_eq!(
        requests[1].params,
        json!({"object": "ep-1", "operation": "processAnswer", "operationParams": {"answer": "v=0"}})
    );
}

#[tokio::test]
async fn test_empty_params_are_omitted() {
    let (client, rx) = client();
    let server = serve(&client, rx, 2, reply);
    let endpoint: WebRtcEndpoint = attached(&client, "ep-1");
    let player: PlayerEndpoint = attached(&client, "player-1");

    endpoint
        .connect(None, MediaType::default(), "")
        .await
        .expect("connect");
    endpoint
        .connect(Some(&player), MEDIATYPE_AUDIO, "")
        .await
        .expect("connect");

    let requests = server.await.expect("server");
    assert_eq!(requests[0].params["operationParams"], json!({}));
    assert_eq!(
        requests[1].params["operationParams"],
        json!({"sink": "player-1", "mediaType": "AUDIO"})
    );
}

#[tokio::test]
async fn test_struct_param_encoding() {
    let (client, rx) = client();
    let server = serve(&client, rx, 2, reply);
    let endpoint: WebRtcEndpoint = attached(&client, "ep-1");

    let candidate = IceCandidate {
        candidate: "candidate:1 1 UDP 2122252543 192.168.1.2 46317 typ host".into(),
        sdp_mid: "0".into(),
        sdp_m_line_index: 0.0,
    };
    endpoint
        .add_ice_candidate(Some(&candidate))
        .await
        .expect("candidate");
    endpoint
        .create_data_channel("chat", true, 3000.0)
        .await
        .expect("data channel");

    let requests = server.await.expect("server");
    assert_eq!(
        requests[0].params["operationParams"],
        json!({"candidate": {
            "candidate": "candidate:1 1 UDP 2122252543 192.168.1.2 46317 typ host",
            "sdpMid": "0"
        }})
    );
    assert_eq!(
        requests[1].params["operationParams"],
        json!({"label": "chat", "ordered": true, "maxPacketLifeTime": 3000.0})
    );
}

#[tokio::test]
async fn test_primitive_and_compound_returns() {
    let (client, rx) = client();
    let server = serve(&client, rx, 3, reply);
    let pipeline: MediaPipeline = attached(&client, "pipe-1");
    let player: PlayerEndpoint = attached(&client, "player-1");

    let dot = pipeline
        .get_gstreamer_dot(GSTREAMERDOTDETAILS_SHOW_ALL)
        .await
        .expect("dot");
    assert_eq!(dot, "digraph pipeline {}");

    let connections = player
        .get_source_connections(MEDIATYPE_VIDEO)
        .await
        .expect("connections");
    assert!(connections.is_empty());

    let info = player.get_video_info().await.expect("info");
    assert!(!info.is_seekable);

    let requests = server.await.expect("server");
    assert_eq!(
        requests[0].params["operationParams"],
        json!({"details": "SHOW_ALL"})
    );
}

#[tokio::test]
async fn test_root_operations_through_deref() {
    let (client, rx) = client();
    let server = serve(&client, rx, 2, reply);
    let endpoint: WebRtcEndpoint = attached(&client, "ep-1");

    endpoint.set_name("caller").await.expect("set name");
    let pipeline = endpoint.get_media_pipeline().await.expect("pipeline");
    assert!(!pipeline.object().is_created());

    let requests = server.await.expect("server");
    assert_eq!(
        requests[0].params,
        json!({"object": "ep-1", "operation": "setName", "operationParams": {"name": "caller"}})
    );
    assert_eq!(requests[1].params["operation"], json!("getMediaPipeline"));
}

#[tokio::test]
async fn test_error_reply() {
    let (client, rx) = client();
    let _server = serve(&client, rx, 1, reject);
    let endpoint: WebRtcEndpoint = attached(&client, "ep-1");

    let result = endpoint.gather_candidates().await;
    assert!(matches!(result, Err(ClientError::Rpc(e)) if e.code == 40101));
}

#[tokio::test]
async fn test_call_on_uncreated_object() {
    let endpoint = WebRtcEndpoint::default();
    assert!(matches!(
        endpoint.gather_candidates().await,
        Err(ClientError::NotCreated)
    ));
}

#[tokio::test]
async fn test_elements_through_capability_trait() {
    let (client, rx) = client();
    let server = serve(&client, rx, 2, reply);
    let elements: Vec<Arc<dyn IMediaElement>> = vec![
        Arc::new(attached::<WebRtcEndpoint>(&client, "ep-1")),
        Arc::new(attached::<PlayerEndpoint>(&client, "player-1")),
    ];

    for element in &elements {
        element
            .set_output_bitrate(500_000.0)
            .await
            .expect("bitrate");
    }

    let requests = server.await.expect("server");
    let targets: Vec<&Value> = requests.iter().map(|r| &r.params["object"]).collect();
    assert_eq!(targets, vec![&json!("ep-1"), &json!("player-1")]);
}

#[test]
fn test_class_constants() {
    assert_eq!(
        WebRtcEndpoint::EVENTS,
        &["OnIceCandidate", "IceGatheringDone"]
    );
    assert!(MediaObject::IS_ABSTRACT);
    assert!(SdpEndpoint::IS_ABSTRACT);
    assert!(!WebRtcEndpoint::IS_ABSTRACT);
    assert_eq!(WebRtcEndpoint::default().wire_type(), "WebRtcEndpoint");
}

#[test]
fn test_enum_values() {
    assert_eq!(MEDIATYPE_AUDIO.as_str(), "AUDIO");
    assert_eq!(GSTREAMERDOTDETAILS_SHOW_MEDIA_TYPE.to_string(), "SHOW_MEDIA_TYPE");
    assert_eq!(MEDIATYPE_DATA.to_value(), json!("DATA"));
    assert!(MediaType::default().is_empty_param());
}

#[test]
fn test_struct_with_remote_fields() {
    let data = ElementConnectionData {
        sink: Some(Arc::new(PlayerEndpoint {
            base: MediaElement {
                base: MediaObject {
                    base: kurento_client::ObjectBase::detached("player-1"),
                    ..Default::default()
                },
            },
        })),
        r#type: MEDIATYPE_VIDEO,
        ..Default::default()
    };

    assert_eq!(data.to_value(), json!({"sink": "player-1", "type": "VIDEO"}));
}
