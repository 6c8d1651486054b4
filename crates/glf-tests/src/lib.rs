//! Integration tests for glf-rs crates.
//!
//! End-to-end checks across crate boundaries: demo matrices uploaded
//! through the shader helpers, and textures through the TGA codec.

#[cfg(test)]
mod tests {
    use std::fs;
    use tempfile::tempdir;

    use glf_demo::{DemoConfig, Demonstration, InputEvent, Key, MouseButton};
    use glf_math::glam::{GlamMat3, GlamMat4};
    use glf_math::{normal, Mat3, Mat4};
    use glf_shader::headless::UniformData;
    use glf_shader::{
        gl_check, init_program_from_files, set_uniform_mat3, set_uniform_mat4, HeadlessGl,
        ShaderApi, ShaderError,
    };

    const SCENE_VERT: &str = "#version 150\n\
        uniform mat4 ProjectionMatrix;\n\
        uniform mat4 ModelViewMatrix;\n\
        uniform mat3 NormalMatrix;\n\
        in vec4 vPosition;\n\
        in vec3 vNormal;\n\
        out vec3 fNormal;\n\
        void main()\n\
        {\n\
            fNormal = NormalMatrix * vNormal;\n\
            gl_Position = ProjectionMatrix * ModelViewMatrix * vPosition;\n\
        }\n";

    const SCENE_FRAG: &str = "#version 150\n\
        uniform vec4 LightPosition;\n\
        in vec3 fNormal;\n\
        out vec4 fColor;\n\
        void main()\n\
        {\n\
            fColor = vec4(max(dot(normalize(fNormal), LightPosition.xyz), 0.0));\n\
        }\n";

    fn uploaded_mat4(gl: &HeadlessGl, name: &str) -> [f32; 16] {
        match gl.last_upload(name).map(|u| u.data) {
            Some(UniformData::Mat4(data)) => data,
            other => panic!("no mat4 upload for {name}: {other:?}"),
        }
    }

    /// Demo input -> matrices -> shader uniforms, read back as GL would.
    #[test]
    fn test_demo_matrices_reach_shader() {
        let dir = tempdir().unwrap();
        let vert = dir.path().join("scene.vert");
        let frag = dir.path().join("scene.frag");
        fs::write(&vert, SCENE_VERT).unwrap();
        fs::write(&frag, SCENE_FRAG).unwrap();

        let gl = HeadlessGl::new();
        let program = init_program_from_files(&gl, &vert, &frag).expect("scene program");
        assert_eq!(gl.live_shaders(), 0);

        let mut demo = Demonstration::new(DemoConfig {
            width: 640,
            height: 480,
            ..Default::default()
        });
        demo.frame([
            InputEvent::Button { button: MouseButton::Left, down: true },
            InputEvent::Motion { x: 120, y: 60 },
            InputEvent::Button { button: MouseButton::Left, down: false },
            InputEvent::Key { key: Key::W, down: true, repeat: false },
        ]);

        let model_view = demo.view();
        let projection = demo.projection();
        let normal_matrix = normal(&model_view);

        set_uniform_mat4(&gl, &program, "ProjectionMatrix", &projection).unwrap();
        set_uniform_mat4(&gl, &program, "ModelViewMatrix", &model_view).unwrap();
        set_uniform_mat3(&gl, &program, "NormalMatrix", &normal_matrix).unwrap();
        gl_check!(&gl).unwrap();

        // GL reads the transposed row-major data as the same column-major matrix.
        let data = uploaded_mat4(&gl, "ModelViewMatrix");
        assert_eq!(GlamMat4::from_cols_array(&data).transpose(), model_view.to_glam());
        let data = uploaded_mat4(&gl, "ProjectionMatrix");
        assert_eq!(Mat4::from_glam(GlamMat4::from_cols_array(&data).transpose()), projection);

        match gl.last_upload("NormalMatrix").map(|u| u.data) {
            Some(UniformData::Mat3(data)) => {
                let m = Mat3::from_glam(GlamMat3::from_cols_array(&data).transpose());
                assert_eq!(m, normal_matrix);
            }
            other => panic!("no mat3 upload: {other:?}"),
        }

        assert!(gl.uploads().iter().all(|u| u.transpose));
        assert!(gl.program_link_status(&program));
    }

    #[test]
    fn test_inactive_uniform_reports_name() {
        let dir = tempdir().unwrap();
        let vert = dir.path().join("scene.vert");
        let frag = dir.path().join("scene.frag");
        fs::write(&vert, SCENE_VERT).unwrap();
        fs::write(&frag, SCENE_FRAG).unwrap();

        let gl = HeadlessGl::new();
        let program = init_program_from_files(&gl, &vert, &frag).unwrap();
        let err = set_uniform_mat4(&gl, &program, "ShadowMatrix", &Mat4::IDENTITY).unwrap_err();

        assert!(matches!(err, ShaderError::UniformNotFound(_)));
        assert_eq!(err.to_string(), "uniform not found: ShadowMatrix");
    }

    #[test]
    fn test_broken_shader_file_leaves_no_objects() {
        let dir = tempdir().unwrap();
        let vert = dir.path().join("scene.vert");
        let frag = dir.path().join("broken.frag");
        fs::write(&vert, SCENE_VERT).unwrap();
        fs::write(&frag, "#version 150\n#error lighting model not ported\n").unwrap();

        let gl = HeadlessGl::new();
        let err = init_program_from_files(&gl, &vert, &frag).unwrap_err();

        assert!(err.to_string().contains("lighting model not ported"));
        assert_eq!(gl.live_shaders(), 0);
        assert_eq!(gl.live_programs(), 0);
        assert!(gl_check!(&gl).is_ok());
    }

    /// Texture written by one tool, read back for upload.
    #[test]
    fn test_tga_texture_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("checker.tga");

        let (w, h) = (16u32, 8u32);
        let mut bgra = Vec::new();
        for y in 0..h {
            for x in 0..w {
                let v = if (x / 4 + y / 4) % 2 == 0 { 230 } else { 25 };
                bgra.extend_from_slice(&[v, v, v, 255]);
            }
        }

        glf_io::write_tga(&path, w, h, 4, &bgra).unwrap();
        let (pixels, width, height, depth) = glf_io::read_tga(&path).unwrap();
        assert_eq!((width, height, depth), (w, h, 4));
        assert_eq!(pixels, bgra);

        let image = glf_io::tga::read(&path).unwrap();
        let rgba = image.to_rgba8();
        assert_eq!(rgba.len(), (w * h * 4) as usize);
        assert_eq!(&rgba[..4], &[230, 230, 230, 255]);
    }

    /// The camera moves in the direction it faces after a drag.
    #[test]
    fn test_demo_walk_after_turn() {
        use approx::assert_abs_diff_eq;

        let mut demo = Demonstration::default();
        // Half a viewport height to the right turns the camera 90 degrees.
        demo.frame([
            InputEvent::Button { button: MouseButton::Left, down: true },
            InputEvent::Motion { x: 300, y: 0 },
            InputEvent::Button { button: MouseButton::Left, down: false },
            InputEvent::Key { key: Key::W, down: true, repeat: false },
        ]);

        let forward = demo.camera_position();
        assert_abs_diff_eq!(forward.length(), demo.config().speed, epsilon = 1e-5);
        assert_abs_diff_eq!(forward.y, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(forward.z, 0.0, epsilon = 1e-5);
    }
}
